//! Meditation Timer - entry point

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use meditation_timer::{
    api::create_router,
    cache::{AssetCache, PRECACHE_URLS},
    config::Config,
    notify::{AlertSound, AudioAlert},
    state::AppState,
    utils::shutdown_signal,
};

/// Default alert asset inside the asset directory
const DEFAULT_SOUND: &str = "./bell.wav";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("meditation_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting meditation-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, assets={}, player={:?}",
          config.host, config.port, config.assets.display(), config.player);

    let player = config.player_command()?;

    let assets = Arc::new(AssetCache::new(&config.assets));
    if let Err(e) = assets.install(PRECACHE_URLS).await {
        warn!("Asset cache install failed, serving from disk only: {}", e);
    }

    let sound = match assets.respond(DEFAULT_SOUND).await {
        Ok(asset) => AlertSound::new("bell.wav", asset.body),
        Err(e) => {
            warn!("Default alert sound unavailable: {}", e);
            AlertSound::silent()
        }
    };
    let alert = Arc::new(AudioAlert::new(sound, player, config.alert_clip()));

    let state = Arc::new(AppState::new(config.port, config.host.clone(), alert, assets));
    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/display - Mask the edit buffer");
    info!("  POST /timer/key     - Key-down filter");
    info!("  GET  /timer/keys    - Key filter rule");
    info!("  POST /timer/start   - Start the countdown");
    info!("  POST /timer/pause   - Pause");
    info!("  POST /timer/resume  - Resume");
    info!("  POST /timer/stop    - Stop and reset");
    info!("  GET  /timer/status  - Current timer status");
    info!("  PUT  /alert-sound   - Replace the alert sound");
    info!("  GET  /health        - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}

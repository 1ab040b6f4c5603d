//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    cache::AssetCache,
    engine::{TickOutcome, TimerEngine, TimerError, TimerEvent, TimerSnapshot},
    input::MaskedText,
    notify::{AlertSound, AudioAlert},
    tasks::spawn_countdown,
};

/// Engine type driven by the service
pub type ServiceEngine = TimerEngine<Arc<AudioAlert>>;

/// Nominal tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Failure of a control request
#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("{0}")]
    Internal(String),
}

impl From<String> for ControlError {
    fn from(message: String) -> Self {
        ControlError::Internal(message)
    }
}

/// User-facing notice raised when a countdown completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    /// Counts completed countdowns; a change means a new notice
    pub sequence: u64,
    pub raised_at: DateTime<Utc>,
}

/// Shared state behind the HTTP handlers and the countdown task
#[derive(Debug)]
pub struct AppState {
    /// The single timer and its tick generation
    pub engine: Mutex<EngineSlot>,
    /// Alert sink shared with the engine
    pub alert: Arc<AudioAlert>,
    /// Offline asset cache
    pub assets: Arc<AssetCache>,
    /// Running countdown task, if any
    pub ticker: Mutex<Option<JoinHandle<()>>>,
    pub tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Most recent time's-up notice
    pub last_notice: Mutex<Option<Notice>>,
}

/// Engine plus the generation of its current countdown.
///
/// Each successful start bumps the generation so a tick task left over from
/// an earlier countdown can never decrement a newer one.
#[derive(Debug)]
pub struct EngineSlot {
    pub engine: ServiceEngine,
    pub generation: u64,
}

impl AppState {
    pub fn new(port: u16, host: String, alert: Arc<AudioAlert>, assets: Arc<AssetCache>) -> Self {
        let engine = TimerEngine::new(Arc::clone(&alert));

        Self {
            engine: Mutex::new(EngineSlot { engine, generation: 0 }),
            alert,
            assets,
            ticker: Mutex::new(None),
            tick_period: TICK_PERIOD,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            last_notice: Mutex::new(None),
        }
    }

    /// Override the tick period
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Run `f` with the engine locked
    fn with_engine<T>(&self, f: impl FnOnce(&mut EngineSlot) -> T) -> Result<T, String> {
        let mut slot = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        Ok(f(&mut slot))
    }

    /// Apply live typing to the display
    pub fn edit_display(&self, raw: &str) -> Result<MaskedText, ControlError> {
        let masked = self.with_engine(|slot| slot.engine.edit_display(raw))??;
        Ok(masked)
    }

    /// Start a countdown from `text`, or from the current display when `None`
    pub fn start(self: &Arc<Self>, text: Option<&str>) -> Result<TimerEvent, ControlError> {
        let (event, generation) = self.with_engine(|slot| {
            let text = text.map_or_else(|| slot.engine.state().display.clone(), str::to_string);
            slot.engine.start(&text).map(|event| {
                slot.generation += 1;
                (event, slot.generation)
            })
        })??;

        let handle = spawn_countdown(Arc::clone(self), generation);
        let mut ticker = self.ticker.lock()
            .map_err(|e| format!("Failed to lock ticker: {}", e))?;
        if let Some(previous) = ticker.replace(handle) {
            previous.abort();
        }
        drop(ticker);

        self.record_action("start");
        Ok(event)
    }

    pub fn pause(&self) -> Result<TimerEvent, ControlError> {
        let event = self.with_engine(|slot| slot.engine.pause())??;
        self.record_action("pause");
        Ok(event)
    }

    pub fn resume(&self) -> Result<TimerEvent, ControlError> {
        let event = self.with_engine(|slot| slot.engine.resume())??;
        self.record_action("resume");
        Ok(event)
    }

    /// Stop the countdown and cancel its tick task
    pub fn stop(&self) -> Result<TimerEvent, ControlError> {
        let event = self.with_engine(|slot| slot.engine.stop())??;
        self.cancel_ticker();
        self.record_action("stop");
        Ok(event)
    }

    /// Deliver one tick on behalf of the countdown task started as `generation`
    pub fn tick(&self, generation: u64) -> Result<TickOutcome, String> {
        let outcome = self.with_engine(|slot| {
            if slot.generation != generation {
                TickOutcome::Cancelled
            } else {
                slot.engine.tick()
            }
        })?;

        if let TickOutcome::Finished(TimerEvent::Finished { notice }) = &outcome {
            self.raise_notice(notice);
        }
        Ok(outcome)
    }

    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.with_engine(|slot| slot.engine.snapshot())
    }

    /// Replace the alert sound for later notifications
    pub fn set_alert_sound(&self, sound: AlertSound) -> Result<(), String> {
        self.alert.set_alert_sound(sound)?;
        self.record_action("alert-sound");
        Ok(())
    }

    pub fn alert_sound_name(&self) -> Result<String, String> {
        self.alert.alert_sound().map(|sound| sound.name().to_string())
    }

    fn cancel_ticker(&self) {
        match self.ticker.lock() {
            Ok(mut ticker) => {
                if let Some(handle) = ticker.take() {
                    handle.abort();
                    debug!("Countdown task aborted");
                }
            }
            Err(e) => warn!("Failed to lock ticker: {}", e),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn raise_notice(&self, message: &str) {
        match self.last_notice.lock() {
            Ok(mut last_notice) => {
                let sequence = last_notice.as_ref().map_or(1, |notice| notice.sequence + 1);
                *last_notice = Some(Notice {
                    message: message.to_string(),
                    sequence,
                    raised_at: Utc::now(),
                });
                info!("Notice #{} raised: {}", sequence, message);
            }
            Err(e) => warn!("Failed to lock last notice: {}", e),
        }
    }

    pub fn get_last_notice(&self) -> Option<Notice> {
        self.last_notice.lock().ok().and_then(|notice| notice.clone())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Abort any running countdown task, used on shutdown
    pub fn shutdown(&self) {
        info!("Cancelling countdown for shutdown");
        self.cancel_ticker();
    }
}

//! Audible alert through an external player process

use std::{
    process::Stdio,
    sync::Mutex,
    time::Duration,
};
use tokio::{io::AsyncWriteExt, process::Command, time::timeout};
use tracing::{debug, error, info, warn};

use super::sink::{AlertSound, NotificationSink, TIMES_UP};

/// Playback is cut after this long even if the clip is longer
pub const DEFAULT_CLIP: Duration = Duration::from_millis(60);

/// Player program and arguments; the sound bytes are written to its stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayerCommand {
    /// Split a whitespace separated command line, `None` if it is blank
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// [`NotificationSink`] that plays a short clip of the current alert sound
#[derive(Debug)]
pub struct AudioAlert {
    sound: Mutex<AlertSound>,
    player: PlayerCommand,
    clip: Duration,
}

impl AudioAlert {
    pub fn new(sound: AlertSound, player: PlayerCommand, clip: Duration) -> Self {
        Self {
            sound: Mutex::new(sound),
            player,
            clip,
        }
    }

    /// Replace the sound used by later notifications
    pub fn set_alert_sound(&self, sound: AlertSound) -> Result<(), String> {
        let mut current = self.sound.lock()
            .map_err(|e| format!("Failed to lock alert sound: {}", e))?;

        info!("Alert sound replaced: {} -> {} ({} bytes)", current.name(), sound.name(), sound.bytes().len());
        *current = sound;
        Ok(())
    }

    /// Get a handle to the current sound
    pub fn alert_sound(&self) -> Result<AlertSound, String> {
        self.sound.lock()
            .map(|sound| sound.clone())
            .map_err(|e| format!("Failed to lock alert sound: {}", e))
    }
}

impl NotificationSink for AudioAlert {
    fn notify(&self) {
        info!("{}", TIMES_UP);

        let sound = match self.alert_sound() {
            Ok(sound) => sound,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

        if sound.is_empty() {
            warn!("No alert sound loaded, skipping playback");
            return;
        }

        let player = self.player.clone();
        let clip = self.clip;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = play_clip(&player, sound, clip).await {
                        error!("Failed to play alert sound: {}", e);
                    }
                });
            }
            Err(_) => warn!("No async runtime available, alert sound not played"),
        }
    }
}

/// Feed `sound` to the player and kill it once `clip` has elapsed
pub async fn play_clip(player: &PlayerCommand, sound: AlertSound, clip: Duration) -> Result<(), String> {
    debug!("Playing alert sound {} with {}", sound.name(), player.program);

    let mut child = Command::new(&player.program)
        .args(&player.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| format!("Failed to execute {}: {}", player.program, e))?;

    if let Some(mut stdin) = child.stdin.take() {
        tokio::spawn(async move {
            // The player is usually killed mid-write
            if let Err(e) = stdin.write_all(sound.bytes()).await {
                debug!("Alert sound write ended early: {}", e);
            }
        });
    }

    match timeout(clip, child.wait()).await {
        Ok(status) => {
            let status = status.map_err(|e| format!("Failed to wait for {}: {}", player.program, e))?;
            debug!("{} exited before the clip ended ({})", player.program, status);
        }
        Err(_) => {
            child.kill().await
                .map_err(|e| format!("Failed to stop {}: {}", player.program, e))?;
            debug!("Alert clip stopped after {:?}", clip);
        }
    }

    Ok(())
}

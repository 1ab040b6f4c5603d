//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::notify::PlayerCommand;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "meditation-timer")]
#[command(about = "A countdown timer service with an audible alert and offline asset cache")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the page assets and the default bell.wav
    #[arg(short, long, default_value = "assets")]
    pub assets: PathBuf,

    /// Audio player command; the alert sound is written to its stdin
    #[arg(long, default_value = "ffplay -nodisp -autoexit -loglevel quiet -")]
    pub player: String,

    /// Alert playback length in milliseconds
    #[arg(long, default_value = "60")]
    pub alert_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn player_command(&self) -> anyhow::Result<PlayerCommand> {
        PlayerCommand::from_command_line(&self.player)
            .ok_or_else(|| anyhow::anyhow!("--player must name a program"))
    }

    pub fn alert_clip(&self) -> Duration {
        Duration::from_millis(self.alert_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["meditation-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.alert_clip(), Duration::from_millis(60));
        assert_eq!(config.player_command().unwrap().program, "ffplay");
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "meditation-timer", "-p", "8080", "--player", "paplay", "--alert-ms", "250", "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level(), "debug");
        assert!(config.player_command().unwrap().args.is_empty());
        assert_eq!(config.alert_clip(), Duration::from_millis(250));
    }

    #[test]
    fn blank_player_is_rejected() {
        let config = Config::try_parse_from(["meditation-timer", "--player", " "]).unwrap();
        assert!(config.player_command().is_err());
    }
}

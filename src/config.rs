//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Clone, Parser)]
#[command(name = "pomodesk")]
#[command(about = "Desk widgets over HTTP: a Pomodoro timer, a clock and a water reminder")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the alarm and reminder sound files
    #[arg(long, default_value = "audio")]
    pub audio_dir: PathBuf,

    /// Command used to play sound files
    #[arg(long, default_value = "mpv")]
    pub player: String,

    /// Extra argument passed to the player before the file name (repeatable)
    #[arg(long = "player-arg", default_values = ["--really-quiet", "--no-video"], allow_hyphen_values = true)]
    pub player_args: Vec<String>,

    /// Never play sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Minutes between water reminders
    #[arg(short, long, default_value = "20", value_parser = clap::value_parser!(u64).range(1..=1440))]
    pub water_interval: u64,

    /// Disable the water reminder
    #[arg(long)]
    pub no_water_reminder: bool,

    /// Countdown tick period in milliseconds
    #[arg(long, default_value = "1000", hide = true)]
    pub tick_millis: u64,

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

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    pub fn water_interval(&self) -> Duration {
        Duration::from_secs(self.water_interval.saturating_mul(60))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["pomodesk"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:20560");
        assert_eq!(config.player, "mpv");
        assert_eq!(config.player_args, vec!["--really-quiet", "--no-video"]);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.water_interval(), Duration::from_secs(20 * 60));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn player_args_override_defaults() {
        let config = Config::parse_from([
            "pomodesk",
            "--player",
            "paplay",
            "--player-arg=--volume=40000",
            "-w",
            "45",
            "-v",
        ]);
        assert_eq!(config.player, "paplay");
        assert_eq!(config.player_args, vec!["--volume=40000"]);
        assert_eq!(config.water_interval(), Duration::from_secs(45 * 60));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn water_interval_is_bounded() {
        assert!(Config::try_parse_from(["pomodesk", "-w", "0"]).is_err());
        assert!(Config::try_parse_from(["pomodesk", "-w", "1441"]).is_err());
        assert!(Config::try_parse_from(["pomodesk", "-w", "18446744073709551615"]).is_err());

        let config = Config::parse_from(["pomodesk", "-w", "1440"]);
        assert_eq!(config.water_interval(), Duration::from_secs(24 * 60 * 60));
    }
}

//! Configuration and CLI argument handling

use clap::{Parser, ValueEnum};

use crate::controller::TimerConfig;

/// Where volume readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VolumeSource {
    /// Poll the default audio sink with `wpctl`
    System,
    /// Only accept levels pushed through `PUT /volume`
    Manual,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "temporizador")]
#[command(about = "A volume-gated countdown timer with configurable completion feedback")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown duration in seconds
    #[arg(short, long, default_value_t = TimerConfig::DEFAULT_DURATION_SECONDS)]
    pub duration: u32,

    /// Volume reading source
    #[arg(long, value_enum, default_value_t = VolumeSource::System)]
    pub volume_source: VolumeSource,

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

    /// Validated countdown configuration
    pub fn timer_config(&self) -> anyhow::Result<TimerConfig> {
        if self.duration == 0 {
            anyhow::bail!("countdown duration must be at least one second");
        }
        Ok(TimerConfig::new(self.duration))
    }
}

//! Configuration and CLI argument handling

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Visualization the wearable display runs against the timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStyle {
    /// Free-running hourglass loop, ignores countdown progress
    Classic,
    /// Sand animation scrubbed by the countdown progress value
    Sand,
}

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "hourglass")]
#[command(about = "A state-managed HTTP service driving a sand-timer countdown")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8642")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown tick cadence in milliseconds
    #[arg(short, long, default_value = "1000")]
    pub tick_millis: u64,

    /// Visualization style advertised to the display
    #[arg(short, long, value_enum, default_value = "sand")]
    pub style: TimerStyle,

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
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

pub use clap::Parser;

use thiserror::Error;

use crate::{packets::NTP_PORT, report::OutputFormat};

/// ConfigurationError represents a command-line value that cannot be used.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Server host must not be empty")]
    EmptyHost,
    #[error("Port must not be 0")]
    InvalidPort,
    #[error("Timeout must be greater than 0 ms")]
    InvalidTimeout,
}

/// Command-line configuration of the `sntp` query tool.
#[derive(Parser, Debug)]
#[clap(author = "Piotr Olszewski", version, about, long_about = None)]
pub struct Configuration {
    /// Time server to query (host name or IP address)
    pub host: String,
    /// UDP port of the time server
    #[clap(short, long, default_value_t = NTP_PORT)]
    pub port: u16,
    /// How long to wait for the reply, in milliseconds
    #[clap(short, long, default_value_t = 5000)]
    pub timeout_ms: u64,
    /// Report output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

impl Configuration {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.host.trim().is_empty() {
            return Err(ConfigurationError::EmptyHost);
        }
        if self.port == 0 {
            return Err(ConfigurationError::InvalidPort);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigurationError::InvalidTimeout);
        }

        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target hostname or IP address
    #[serde(default)]
    pub target_host: String,

    /// Target UDP port
    #[serde(default)]
    pub target_port: u16,

    /// Number of probe packets to send
    #[serde(default = "default_packet_count")]
    pub packet_count: u32,

    /// Overall receive timeout duration in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Emit the report as JSON instead of formatted tables
    #[serde(default)]
    pub json: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_host: String::new(),
            target_port: 0,
            packet_count: default_packet_count(),
            timeout_seconds: default_timeout_secs(),
            enable_color: default_enable_color(),
            json: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the overall receive timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.target_host.is_empty() {
            return Err(AppError::config("Target host cannot be empty"));
        }

        if self.target_port == 0 {
            return Err(AppError::config("Target port must be between 1 and 65535"));
        }

        if self.packet_count == 0 {
            return Err(AppError::config("Packet count must be greater than 0"));
        }

        if self.packet_count > crate::defaults::MAX_PACKET_COUNT {
            return Err(AppError::config(format!(
                "Packet count cannot exceed {}",
                crate::defaults::MAX_PACKET_COUNT
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > 300 {
            return Err(AppError::config("Timeout cannot exceed 300 seconds"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("TARGET_HOST") {
            let host = host.trim().to_string();
            if !host.is_empty() {
                self.target_host = host;
            }
        }

        if let Ok(port) = std::env::var("TARGET_PORT") {
            self.target_port = port
                .parse()
                .map_err(|e| AppError::config(format!("Invalid TARGET_PORT value '{}': {}", port, e)))?;
        }

        if let Ok(count) = std::env::var("PACKET_COUNT") {
            self.packet_count = count
                .parse()
                .map_err(|e| AppError::config(format!("Invalid PACKET_COUNT value '{}': {}", count, e)))?;
        }

        if let Ok(timeout) = std::env::var("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout
                .parse()
                .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color
                .parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_packet_count() -> u32 {
    crate::defaults::DEFAULT_PACKET_COUNT
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            target_host: "example.com".to_string(),
            target_port: 4000,
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_host_invalid() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_invalid() {
        let mut config = valid_config();
        config.target_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_packet_count_invalid() {
        let mut config = valid_config();
        config.packet_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_packet_count_invalid() {
        let mut config = valid_config();
        config.packet_count = crate::defaults::MAX_PACKET_COUNT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_invalid() {
        let mut config = valid_config();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_duration() {
        let mut config = valid_config();
        config.timeout_seconds = 7;
        assert_eq!(config.timeout(), Duration::from_secs(7));
    }
}

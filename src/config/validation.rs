//! Configuration validation with advisory warnings

use crate::error::Result;
use crate::models::Config;

/// A non-fatal configuration observation worth surfacing to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    message: String,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Warning text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Format the warning for console display
    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            use colored::Colorize;
            format!("{} {}", "warning:".yellow().bold(), self.message.yellow())
        } else {
            format!("warning: {}", self.message)
        }
    }
}

/// Validates a configuration and collects advisory warnings
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run hard validation, then collect warnings about legal but
    /// questionable settings
    pub fn validate(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();

        if config.timeout_seconds > 60 {
            warnings.push(ValidationWarning::new(format!(
                "Timeout of {}s is unusually long; responses normally arrive within seconds",
                config.timeout_seconds
            )));
        }

        if config.packet_count == 1 {
            warnings.push(ValidationWarning::new(
                "A single packet gives no latency distribution; consider a larger batch",
            ));
        }

        if config.timeout_seconds == 1 && config.packet_count > 50 {
            warnings.push(ValidationWarning::new(
                "A 1s timeout with a large batch may cut off responses still in flight",
            ));
        }

        Ok(warnings)
    }
}

/// Validate the configuration and return any warnings
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate(config)
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
    fn test_clean_config_has_no_warnings() {
        let warnings = validate_config(&valid_config()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_long_timeout_warns() {
        let mut config = valid_config();
        config.timeout_seconds = 120;

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message().contains("unusually long"));
    }

    #[test]
    fn test_single_packet_warns() {
        let mut config = valid_config();
        config.packet_count = 1;

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_tight_timeout_with_large_batch_warns() {
        let mut config = valid_config();
        config.timeout_seconds = 1;
        config.packet_count = 100;

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_hard_error() {
        let mut config = valid_config();
        config.packet_count = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_warning_formatting() {
        let warning = ValidationWarning::new("test warning");
        assert_eq!(warning.format(false), "warning: test warning");
        assert!(warning.format(true).contains("test warning"));
    }
}

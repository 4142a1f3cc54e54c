//! Configuration parsing from CLI arguments and environment variables

use crate::cli::Cli;
use crate::config::env::EnvManager;
use crate::error::Result;
use crate::models::Config;

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration.
    ///
    /// Precedence, lowest to highest: defaults, `.env` file, environment
    /// variables, CLI arguments.
    pub fn parse(&self) -> Result<Config> {
        // Start with default configuration
        let mut config = Config::default();

        // Load from environment file if it exists
        EnvManager::load_env_file(self.cli.debug)?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config);

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.cli.host {
            config.target_host = host.clone();
        }

        if let Some(port) = self.cli.port {
            config.target_port = port;
        }

        // Override test parameters only when they differ from the defaults,
        // so environment values survive an unadorned invocation
        if self.cli.count != crate::defaults::DEFAULT_PACKET_COUNT {
            config.packet_count = self.cli.count;
        }

        if self.cli.timeout != crate::defaults::DEFAULT_TIMEOUT.as_secs() {
            config.timeout_seconds = self.cli.timeout;
        }

        if self.cli.color || self.cli.no_color {
            config.enable_color = self.cli.use_colors();
        }

        if self.cli.json {
            config.json = true;
        }

        if self.cli.verbose {
            config.verbose = true;
        }

        if self.cli.debug {
            config.debug = true;
        }
    }
}

/// Load the complete configuration from CLI arguments and the environment
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Render a human-readable configuration summary for debug output
pub fn display_config_summary(config: &Config) -> String {
    format!(
        "  Target: {}:{}\n  Packets: {}\n  Timeout: {}s\n  Color output: {}\n  JSON output: {}",
        config.target_host,
        config.target_port,
        config.packet_count,
        config.timeout_seconds,
        config.enable_color,
        config.json
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("upp").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_with_positional_target() {
        let config = load_config(cli(&["127.0.0.1", "4000"])).unwrap();
        assert_eq!(config.target_host, "127.0.0.1");
        assert_eq!(config.target_port, 4000);
        assert_eq!(config.packet_count, crate::defaults::DEFAULT_PACKET_COUNT);
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let config = load_config(cli(&["127.0.0.1", "4000", "-n", "10", "-t", "30", "--verbose"])).unwrap();
        assert_eq!(config.packet_count, 10);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_target_rejected() {
        assert!(load_config(cli(&[])).is_err());
    }

    #[test]
    fn test_no_color_flag_applies() {
        let config = load_config(cli(&["127.0.0.1", "4000", "--no-color"])).unwrap();
        assert!(!config.enable_color);
    }

    #[test]
    fn test_config_summary_contains_target() {
        let config = load_config(cli(&["127.0.0.1", "4000"])).unwrap();
        let summary = display_config_summary(&config);
        assert!(summary.contains("127.0.0.1:4000"));
    }
}

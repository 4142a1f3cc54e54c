//! Command-line interface module

use clap::Parser;

/// UDP Packet Probe - measure round-trip latency and packet loss with per-region statistics
#[derive(Parser, Debug, Clone)]
#[command(name = "udp-packet-probe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target hostname or IP address
    pub host: Option<String>,

    /// Target UDP port
    pub port: Option<u16>,

    /// Number of probe packets to send
    #[arg(short = 'n', long = "num-packets", default_value_t = crate::defaults::DEFAULT_PACKET_COUNT)]
    pub count: u32,

    /// Overall timeout in seconds for receiving responses
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        // Host and port may come from the environment instead; the config
        // layer enforces their presence after merging
        if let Some(port) = self.port {
            if port == 0 {
                return Err("Port must be between 1 and 65535".to_string());
            }
        }

        if self.count == 0 || self.count > crate::defaults::MAX_PACKET_COUNT {
            return Err(format!(
                "Number of packets must be between 1 and {}",
                crate::defaults::MAX_PACKET_COUNT
            ));
        }

        if self.timeout == 0 {
            return Err("Timeout must be positive".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }
}

/// Detect whether the terminal supports colored output
fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => true,
    }
}

//! Output formatting and display system
//!
//! Provides the report formatting interface with colored and plain text
//! implementations, plus a coordinator that assembles a full console report.

mod colored;
mod formatter;

pub use colored::{ColoredFormatter, LatencyLevel};
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter};

use crate::error::Result;
use crate::models::Report;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            max_width: 80,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// Main output coordinator that assembles the full report display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Render the complete session report
    pub fn display_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.formatter.format_header("UDP Packet Probe Results")?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_summary(report)?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_region_table(report)?);

        if report.total_excess_claimed > 0 {
            output.push('\n');
            output.push('\n');
            output.push_str(&self.formatter.format_warning(&format!(
                "Remote endpoints claimed {} more packet(s) than were outstanding",
                report.total_excess_claimed
            ))?);
        }

        Ok(output)
    }
}

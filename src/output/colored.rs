//! Colored formatter implementation with terminal color support

use crate::error::Result;
use crate::models::Report;
use crate::output::formatter::{FormattingOptions, OutputFormatter};
use colored::*;
use std::fmt::Write as _;

/// Latency classification for color coding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatencyLevel {
    Excellent, // < 50ms
    Good,      // 50-100ms
    Fair,      // 100-300ms
    Poor,      // 300-1000ms
    VeryPoor,  // > 1000ms
}

impl LatencyLevel {
    /// Determine latency level from a round-trip time in milliseconds
    pub fn from_latency(latency_ms: f64) -> Self {
        if latency_ms < 50.0 {
            Self::Excellent
        } else if latency_ms < 100.0 {
            Self::Good
        } else if latency_ms < 300.0 {
            Self::Fair
        } else if latency_ms < 1000.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this latency level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }
}

/// Loss rate classification for color coding the summary
fn loss_color(loss_rate: f64) -> Color {
    if loss_rate == 0.0 {
        Color::Green
    } else if loss_rate < 0.05 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Rich colored formatter sharing the plain table structure
pub struct ColoredFormatter {
    options: FormattingOptions,
}

impl ColoredFormatter {
    /// Create a new colored formatter
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let separator = "=".repeat(self.options.max_width.min(60));
        Ok(format!(
            "{}\n{}\n{}",
            separator.bright_blue(),
            title.bright_white().bold(),
            separator.bright_blue()
        ))
    }

    fn format_summary(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Packets attempted:    {}", report.attempted).ok();

        let failures = report.send_failures.to_string();
        let failures = if report.send_failures > 0 {
            failures.yellow().to_string()
        } else {
            failures
        };
        writeln!(output, "Send failures:        {}", failures).ok();
        writeln!(output, "Successful sends:     {}", report.successful_sends).ok();
        writeln!(output, "Responses received:   {}", report.total_responses).ok();
        writeln!(output, "Packets attributed:   {}", report.total_attributed).ok();
        writeln!(output, "Packets lost:         {}", report.packets_lost).ok();

        match (report.loss_rate, report.loss_percentage()) {
            (Some(rate), Some(pct)) => {
                let formatted = format!("{:.1}%", pct).color(loss_color(rate)).bold();
                writeln!(output, "Loss rate:            {}", formatted).ok();
            }
            _ => {
                writeln!(output, "Loss rate:            {}", "n/a (nothing sent)".dimmed()).ok();
            }
        }

        if report.total_excess_claimed > 0 {
            writeln!(
                output,
                "Excess claimed:       {}",
                report.total_excess_claimed.to_string().yellow()
            )
            .ok();
        }

        Ok(output.trim_end().to_string())
    }

    fn format_region_table(&self, report: &Report) -> Result<String> {
        if report.regions.is_empty() {
            return self.format_no_data_notice();
        }

        let region_width = report
            .regions
            .keys()
            .map(|r| r.len())
            .max()
            .unwrap_or(6)
            .max("Region".len());

        let mut output = String::new();
        let header = format!(
            "{:<width$}  {:>7}  {:>10}  {:>10}  {:>10}",
            "Region",
            "Count",
            "Min (ms)",
            "Max (ms)",
            "Mean (ms)",
            width = region_width
        );
        writeln!(output, "{}", header.bold()).ok();
        writeln!(output, "{}", "-".repeat(region_width + 45).bright_black()).ok();

        for (region, stats) in &report.regions {
            let level = LatencyLevel::from_latency(stats.mean_ms);
            let mean = format!("{:>10.2}", stats.mean_ms).color(level.color());
            writeln!(
                output,
                "{:<width$}  {:>7}  {:>10.2}  {:>10.2}  {}",
                region.bright_white(),
                stats.count,
                stats.min_ms,
                stats.max_ms,
                mean,
                width = region_width
            )
            .ok();
        }

        Ok(output.trim_end().to_string())
    }

    fn format_no_data_notice(&self) -> Result<String> {
        Ok("No responses received - no latency data to report"
            .yellow()
            .to_string())
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", "Warning:".yellow().bold(), warning.yellow()))
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("{} {}", "Error:".red().bold(), error.red()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_level_classification() {
        assert_eq!(LatencyLevel::from_latency(10.0), LatencyLevel::Excellent);
        assert_eq!(LatencyLevel::from_latency(75.0), LatencyLevel::Good);
        assert_eq!(LatencyLevel::from_latency(200.0), LatencyLevel::Fair);
        assert_eq!(LatencyLevel::from_latency(500.0), LatencyLevel::Poor);
        assert_eq!(LatencyLevel::from_latency(2000.0), LatencyLevel::VeryPoor);
    }

    #[test]
    fn test_latency_level_colors() {
        assert_eq!(LatencyLevel::Excellent.color(), Color::Green);
        assert_eq!(LatencyLevel::VeryPoor.color(), Color::Red);
    }

    #[test]
    fn test_loss_color_thresholds() {
        assert_eq!(loss_color(0.0), Color::Green);
        assert_eq!(loss_color(0.01), Color::Yellow);
        assert_eq!(loss_color(0.5), Color::Red);
    }

    #[test]
    fn test_colored_formatter_produces_output() {
        use crate::models::RegionStats;
        use chrono::Utc;
        use std::collections::BTreeMap;

        let mut regions = BTreeMap::new();
        regions.insert(
            "us-east-1".to_string(),
            RegionStats {
                count: 3,
                min_ms: 5.0,
                max_ms: 15.0,
                mean_ms: 10.0,
            },
        );
        let report = Report {
            attempted: 3,
            send_failures: 0,
            successful_sends: 3,
            total_responses: 1,
            total_attributed: 3,
            total_excess_claimed: 0,
            packets_lost: 0,
            loss_rate: Some(0.0),
            regions,
            generated_at: Utc::now(),
        };

        let formatter = ColoredFormatter::new(FormattingOptions::default());
        let table = formatter.format_region_table(&report).unwrap();
        assert!(table.contains("us-east-1"));

        let summary = formatter.format_summary(&report).unwrap();
        assert!(summary.contains("Packets attempted"));
    }
}

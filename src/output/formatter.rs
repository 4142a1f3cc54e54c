//! Core formatting traits and the plain text implementation

use crate::error::Result;
use crate::models::Report;
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the overall session summary
    fn format_summary(&self, report: &Report) -> Result<String>;

    /// Format per-region latency statistics as a table
    fn format_region_table(&self, report: &Report) -> Result<String>;

    /// Format the explicit notice shown when no responses arrived
    fn format_no_data_notice(&self) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Format error messages
    fn format_error(&self, error: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with detailed information
    pub verbose_mode: bool,
    /// Maximum output width
    pub max_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            max_width: 80,
        }
    }
}

/// Plain text formatter without colors
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    fn separator(&self) -> String {
        "=".repeat(self.options.max_width.min(60))
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        Ok(format!("{}\n{}\n{}", self.separator(), title, self.separator()))
    }

    fn format_summary(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Packets attempted:    {}", report.attempted).ok();
        writeln!(output, "Send failures:        {}", report.send_failures).ok();
        writeln!(output, "Successful sends:     {}", report.successful_sends).ok();
        writeln!(output, "Responses received:   {}", report.total_responses).ok();
        writeln!(output, "Packets attributed:   {}", report.total_attributed).ok();
        writeln!(output, "Packets lost:         {}", report.packets_lost).ok();
        match report.loss_percentage() {
            Some(pct) => writeln!(output, "Loss rate:            {:.1}%", pct).ok(),
            None => writeln!(output, "Loss rate:            n/a (nothing sent)").ok(),
        };
        if report.total_excess_claimed > 0 {
            writeln!(output, "Excess claimed:       {}", report.total_excess_claimed).ok();
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
        writeln!(
            output,
            "{:<width$}  {:>7}  {:>10}  {:>10}  {:>10}",
            "Region",
            "Count",
            "Min (ms)",
            "Max (ms)",
            "Mean (ms)",
            width = region_width
        )
        .ok();
        writeln!(output, "{}", "-".repeat(region_width + 45)).ok();

        for (region, stats) in &report.regions {
            writeln!(
                output,
                "{:<width$}  {:>7}  {:>10.2}  {:>10.2}  {:>10.2}",
                region,
                stats.count,
                stats.min_ms,
                stats.max_ms,
                stats.mean_ms,
                width = region_width
            )
            .ok();
        }

        Ok(output.trim_end().to_string())
    }

    fn format_no_data_notice(&self) -> Result<String> {
        Ok("No responses received - no latency data to report".to_string())
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("Warning: {}", warning))
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("Error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionStats;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn sample_report() -> Report {
        let mut regions = BTreeMap::new();
        regions.insert(
            "us-west-2".to_string(),
            RegionStats {
                count: 7,
                min_ms: 10.25,
                max_ms: 52.5,
                mean_ms: 24.1,
            },
        );
        Report {
            attempted: 10,
            send_failures: 0,
            successful_sends: 10,
            total_responses: 1,
            total_attributed: 7,
            total_excess_claimed: 0,
            packets_lost: 3,
            loss_rate: Some(0.3),
            regions,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_contains_counters() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let summary = formatter.format_summary(&sample_report()).unwrap();

        assert!(summary.contains("Packets attempted:    10"));
        assert!(summary.contains("Packets lost:         3"));
        assert!(summary.contains("30.0%"));
    }

    #[test]
    fn test_region_table_layout() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let table = formatter.format_region_table(&sample_report()).unwrap();

        assert!(table.contains("Region"));
        assert!(table.contains("us-west-2"));
        assert!(table.contains("10.25"));
        assert!(table.contains("52.50"));
        assert!(table.contains("24.10"));
    }

    #[test]
    fn test_empty_report_shows_no_data_notice() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let mut report = sample_report();
        report.regions.clear();

        let table = formatter.format_region_table(&report).unwrap();
        assert!(table.contains("No responses received"));
    }

    #[test]
    fn test_undefined_loss_rate() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let mut report = sample_report();
        report.successful_sends = 0;
        report.loss_rate = None;

        let summary = formatter.format_summary(&report).unwrap();
        assert!(summary.contains("n/a"));
    }
}

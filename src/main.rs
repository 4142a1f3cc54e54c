//! UDP Packet Probe - Main CLI Application
//!
//! Sends a batch of UDP datagrams to a target, collects aggregate
//! "count + region" acknowledgements, and reports per-region round-trip
//! latency statistics and packet loss.

use clap::Parser;
use std::process;
use udp_packet_probe::{
    app::run_application,
    cli::Cli,
    error::AppError,
};

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("Please report this issue at: https://github.com/MaurUppi/udp-packet-probe/issues");
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    // Handle the actual application logic
    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(supports_stderr_color()));

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Whether stderr error output should be colored
fn supports_stderr_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Usage: upp <host> <port> [-n packets] [-t timeout]");
            eprintln!("  - Packet count must be between 1 and 100");
            eprintln!("  - Timeout must be a positive number of seconds");
        }
        AppError::Resolution(_) => {
            eprintln!();
            eprintln!("Resolution help:");
            eprintln!("  - Check if the hostname exists");
            eprintln!("  - Test DNS resolution manually with 'nslookup' or 'dig'");
            eprintln!("  - Try an IP address instead of a hostname");
        }
        AppError::Send(_) | AppError::Transport(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Verify firewall settings allow outbound UDP");
            eprintln!("  - Confirm the target port is correct");
        }
        AppError::Timeout(_) => {
            eprintln!();
            eprintln!("Timeout troubleshooting:");
            eprintln!("  - Increase the timeout with --timeout");
            eprintln!("  - The endpoint may batch responses; allow a few extra seconds");
        }
        _ => {}
    }
}

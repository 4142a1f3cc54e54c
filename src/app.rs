//! Main application orchestration and execution

use crate::cli::Cli;
use crate::config::{display_config_summary, load_config, validate_config};
use crate::error::{AppError, Result};
use crate::logging::LoggerFactory;
use crate::models::Report;
use crate::output::{OutputCoordinator, OutputFormatterFactory};
use crate::resolve::resolve_target;
use crate::session::{Attributor, Collector, Phase, Sender, Session};
use crate::stats::StatisticsAggregator;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// Run one complete probe session and print the report.
///
/// The session walks `Idle → Sending → Receiving → Summarized`. Only a
/// resolution failure before the send phase aborts the run; everything after
/// that proceeds to summarization with whatever data was collected.
pub async fn run_application(cli: Cli) -> Result<()> {
    cli.validate().map_err(AppError::validation)?;

    let config = load_config(cli)?;
    let factory = LoggerFactory::new(config.clone());
    let logger = factory.create_logger("APP");

    let warnings = validate_config(&config)?;
    for warning in &warnings {
        eprintln!("{}", warning.format(config.enable_color));
    }

    if config.debug {
        println!("Configuration loaded:");
        println!("{}", display_config_summary(&config));
    }

    // Resolution failure is the only fatal error: nothing has been sent yet
    let target = resolve_target(&config.target_host, config.target_port).await?;
    if config.verbose {
        println!("Using address family: {}", target.family());
        println!("Target address: {}", target.addr);
    }

    let socket = Arc::new(UdpSocket::bind(target.bind_addr()).await?);
    let session = Arc::new(Session::new());

    // Send phase
    session.advance(Phase::Sending);
    if config.verbose {
        println!(
            "Sending {} packets to {}:{}...",
            config.packet_count, config.target_host, config.target_port
        );
    }
    let sender = Sender::new(socket.clone(), session.clone(), factory.create_logger("SEND"));
    let send_outcome = sender.send_all(target.addr, config.packet_count).await;

    if config.verbose {
        println!(
            "Sent {} of {} packets. Waiting up to {}s for responses...",
            send_outcome.successful, send_outcome.attempted, config.timeout_seconds
        );
    }

    // Receive phase; ends at the deadline, or early on a transport error
    session.advance(Phase::Receiving);
    let attributor = Attributor::new(session.clone(), factory.create_logger("ATTR"));
    let collector = Collector::new(socket, attributor, factory.create_logger("RECV"));
    let collect_outcome = collector.run(config.timeout()).await;

    // Summarization always fires, however the receive loop exited
    let frozen = session.freeze();
    let report = StatisticsAggregator::summarize(&frozen);

    if collect_outcome.ended_early {
        logger
            .warn("Receive phase ended early; report covers partial data")
            .log();
    }

    print_report(&config, &report)?;

    Ok(())
}

/// Print the report in the configured output format
fn print_report(config: &crate::models::Config, report: &Report) -> Result<()> {
    if config.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.verbose);
        let coordinator = OutputCoordinator::new(formatter);
        println!("{}", coordinator.display_report(report)?);
    }
    Ok(())
}

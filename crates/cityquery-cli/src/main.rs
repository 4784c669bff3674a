//! CityQuery Entry Point

use cityquery_cli::{Args, run};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("CityQuery v{}", env!("CARGO_PKG_VERSION"));

    let report = match run(&args, &config) {
        Ok(r) => r,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    if let Some(plan) = &report.plan {
        for predicate in &plan.predicates {
            info!("Applied: {}", predicate);
        }
        for reason in &plan.skipped {
            info!("Skipped: {}", reason);
        }
    }

    for name in &report.selected {
        println!("{}", name);
    }

    if let Some(attrs) = &report.inspected {
        match serde_json::to_string_pretty(attrs) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to format attributes: {}", e),
        }
    }

    if report.exported > 0 {
        info!("Exported {} buildings", report.exported);
    }
}

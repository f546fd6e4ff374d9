//! Lifecoord CLI Binary
//!
//! Command-line interface for agent configuration and workflow coordination.

use clap::Parser;
use lifecoord::cli::{Cli, RunContext};
use lifecoord::config::ConfigResolver;
use lifecoord::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Lifecoord CLI starting");

    let context = match RunContext::new(cli.config_dir.clone(), cli.gateway_url.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing context: {}", e);
            eprintln!("{}", lifecoord::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", lifecoord::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Logging stays off unless `--verbose` or `--log-level` is given.
/// Precedence: CLI flags override global.yaml override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let global = ConfigResolver::new(cli.config_dir.clone()).load_global();
    let mut config = LoggingConfig::from_global(&global.logging);

    config.enabled = cli.verbose || cli.log_level.is_some();
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}

// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Estatekeep - follow-up and escalation tracking for estate settlement.
//!
//! This is the binary entry point.

mod check;
mod rules;
mod serve;
mod shutdown;
mod stack;
mod sweep;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use estatekeep_config::EstatekeepConfig;

/// Estatekeep - follow-up and escalation tracking for estate settlement.
#[derive(Parser, Debug)]
#[command(name = "estatekeep", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the standard search path.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server and the periodic escalation sweep.
    Serve,
    /// Run the no-response escalation sweep once and exit.
    Sweep,
    /// Print the effective follow-up rule table.
    Rules,
    /// Validate configuration and storage, then report.
    Check,
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<EstatekeepConfig, Vec<estatekeep_config::ConfigError>> {
    match path {
        Some(path) => estatekeep_config::load_and_validate_path(path),
        None => estatekeep_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            estatekeep_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Sweep) => sweep::run_sweep(&config).await,
        Some(Commands::Rules) => {
            rules::run_rules(&config);
            Ok(())
        }
        Some(Commands::Check) => check::run_check(&config).await,
        None => {
            println!("estatekeep: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

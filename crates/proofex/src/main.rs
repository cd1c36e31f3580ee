// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proofex - inspect present-proof exchange records.
//!
//! This is the binary entry point. Commands print JSON (or TOML for `config`)
//! to stdout; logs go to stderr.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use proofex_config::ProofexConfig;

use crate::commands::ListArgs;

/// Proofex - inspect present-proof exchange records.
#[derive(Parser, Debug)]
#[command(name = "proofex", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the standard search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List exchange records matching the given tags.
    List(ListArgs),
    /// Show one exchange record by id.
    Show {
        /// Presentation exchange id.
        id: String,
    },
    /// Print the exchange record field descriptors.
    Schema,
    /// Print the effective configuration.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> ProofexConfig {
    let loaded = match path {
        Some(path) => proofex_config::load_and_validate_path(path),
        None => proofex_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            proofex_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("proofex={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.log.level);

    let output = match cli.command {
        Commands::List(args) => commands::run_list(&config, &args).await,
        Commands::Show { id } => commands::run_show(&config, &id).await,
        Commands::Schema => commands::run_schema(),
        Commands::Config => commands::run_config(&config),
    };

    match output {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("proofex: {e}");
            std::process::exit(1);
        }
    }
}

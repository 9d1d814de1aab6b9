//! Courtside CLI
//!
//! Ask NBA questions from the terminal or serve them over HTTP.

use anyhow::Result;
use clap::Parser;
use courtside_core::{exit_codes, Config, CourtsideError};
use std::process::ExitCode;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<CourtsideError>()
                .map_or(exit_codes::GENERAL_ERROR, CourtsideError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, config).await,
        Commands::Ask(args) => commands::ask::run(args, &config, cli.format).await,
        Commands::Intent(args) => commands::intent::run(args, &config, cli.format).await,
        Commands::Stats(args) => commands::stats::run(args, &config, cli.format).await,
        Commands::Config => commands::config::run(&config, cli.format),
    }
}

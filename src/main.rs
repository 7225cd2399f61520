use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{cli::Cli, config::Config};

mod cli;
mod config;
mod convert;
mod date;
mod entry;
mod error;
mod format;
mod loader;
mod writer;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(args);
    let summary = convert::run(&config)?;

    println!("Markdown bibliography written to {}", config.output.display());
    eprintln!(
        "{} {}",
        format!("✓ {}", summary.written).green(),
        format!("✗ {}", summary.skipped).red()
    );
    Ok(())
}

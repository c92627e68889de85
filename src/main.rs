//! Ledgerbot - conversational assistant for ERP workflows
//!
//! Usage:
//!   ledgerbot chat               Interactive chat session
//!   ledgerbot send "message"     One-shot message, reply on stdout
//!   ledgerbot --help             Show all commands

use anyhow::Result;
use clap::Parser;

use ledgerbot::cli::{execute, Cli};
use ledgerbot::config::Config;
use ledgerbot::init::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ledgerbot=info".parse()?),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config, cli.seed)?;

    execute(&cli.command, &ctx).await?;

    Ok(())
}

//! CLI interface: an interactive chat REPL and a one-shot send mode.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::init::AppContext;
use crate::LedgerbotError;

/// Ledgerbot - conversational assistant for ERP workflows
#[derive(Parser)]
#[command(name = "ledgerbot", version, about, long_about = None)]
pub struct Cli {
    /// Override config file path (default: ~/.ledgerbot/config.toml)
    #[arg(long, env = "LEDGERBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Seed for deterministic reply selection
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session on stdin/stdout
    Chat {
        /// User id for the session
        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Send a single message and print the reply
    Send {
        /// The message text
        message: String,
        /// User id for the session
        #[arg(long, default_value = "local")]
        user: String,
    },
}

/// Dispatch a parsed command against the application context.
pub async fn execute(cmd: &Commands, ctx: &AppContext) -> Result<(), LedgerbotError> {
    match cmd {
        Commands::Chat { user } => chat(ctx, user).await,
        Commands::Send { message, user } => {
            if let Some(reply) = ctx.engine.handle_message(user, message).await? {
                println!("{}", reply);
            }
            Ok(())
        }
    }
}

/// Line-oriented REPL. `exit`/`quit` or EOF ends the session.
async fn chat(ctx: &AppContext, user: &str) -> Result<(), LedgerbotError> {
    println!(
        "{} Type a message, or {} to leave.",
        "Chatting with ledgerbot.".bold(),
        "exit".yellow()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(format!("{} ", "you>".green().bold()).as_bytes()).await?;
        stdout.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }

        match ctx.engine.handle_message(user, trimmed).await {
            Ok(Some(reply)) => {
                println!("{} {}", "bot>".cyan().bold(), reply);
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
        }
    }

    println!("{}", "Bye!".bold());
    Ok(())
}

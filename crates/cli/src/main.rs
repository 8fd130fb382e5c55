//! LiteClaw CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config directory and default config.toml
//! - `chat`    — Interactive chat or single-message mode
//! - `facts`   — Show everything remembered about a user
//! - `reset`   — Wipe a conversation's history

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "liteclaw",
    about = "LiteClaw — a conversational agent with persistent memory",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Chat with the agent
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Conversation id (history is kept per conversation)
        #[arg(long, default_value_t = 1)]
        chat: i64,

        /// User id (facts are kept per user)
        #[arg(long, default_value_t = 1)]
        user: i64,
    },

    /// Show everything remembered about a user
    Facts {
        /// User id
        #[arg(long, default_value_t = 1)]
        user: i64,

        /// Dump the raw per-set storage view instead of the rendered facts
        #[arg(long)]
        raw: bool,
    },

    /// Wipe a conversation's history (facts are kept)
    Reset {
        /// Conversation id
        #[arg(long, default_value_t = 1)]
        chat: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message, chat, user } => commands::chat::run(message, chat, user).await?,
        Commands::Facts { user, raw } => commands::facts::run(user, raw).await?,
        Commands::Reset { chat } => commands::reset::run(chat).await?,
    }

    Ok(())
}

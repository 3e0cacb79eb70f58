use clap::{Parser, Subcommand};
use tracing::warn;

mod commands;

use commands::agenda::AgendaCommand;
use commands::competitors::CompetitorsCommand;
use commands::knowledge::KnowledgeCommand;
use commands::meetings::MeetingsCommand;
use commands::memory::MemoryCommand;
use commands::news::NewsCommand;

/// Command-line client for Sonja, the AFAS marketing assistant.
#[derive(Parser, Debug)]
#[command(name = "sonja", version, about)]
struct Cli {
    /// Path to sonja.toml; defaults to ~/.sonja/sonja.toml.
    #[arg(long, env = "SONJA_CONFIG", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with Sonja in an interactive session.
    Chat {
        /// Wait for the full answer instead of streaming steps live.
        #[arg(long)]
        no_stream: bool,
    },
    /// Meeting transcript tools.
    Meetings {
        #[command(subcommand)]
        command: MeetingsCommand,
    },
    /// Analyze a website from a marketing angle.
    Website {
        url: String,
        /// Extra instruction for the agent.
        #[arg(long)]
        prompt: Option<String>,
        /// Wait for the full answer instead of streaming steps live.
        #[arg(long)]
        no_stream: bool,
    },
    /// Track and analyze competitors.
    Competitors {
        #[command(subcommand)]
        command: CompetitorsCommand,
    },
    /// AFAS-related news and content generation.
    News {
        #[command(subcommand)]
        command: NewsCommand,
    },
    /// Scheduled agent tasks.
    Agenda {
        #[command(subcommand)]
        command: AgendaCommand,
    },
    /// Files Sonja consults while answering.
    Knowledge {
        #[command(subcommand)]
        command: KnowledgeCommand,
    },
    /// Notes the agent wrote down itself.
    Memory {
        #[command(subcommand)]
        command: MemoryCommand,
    },
    /// Check whether the backend is up.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sonja_cli=info,sonja_client=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: explicit path / SONJA_CONFIG env > ~/.sonja/sonja.toml
    let config = sonja_core::SonjaConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        sonja_core::SonjaConfig::default()
    });

    let client = sonja_client::SonjaClient::new(&config)?;

    match cli.command {
        Command::Chat { no_stream } => {
            commands::chat::run(&client, no_stream, config.chat.context_turns).await
        }
        Command::Meetings { command } => commands::meetings::run(&client, command).await,
        Command::Website {
            url,
            prompt,
            no_stream,
        } => commands::website::run(&client, &url, prompt.as_deref(), no_stream).await,
        Command::Competitors { command } => commands::competitors::run(&client, command).await,
        Command::News { command } => commands::news::run(&client, command).await,
        Command::Agenda { command } => commands::agenda::run(&client, command).await,
        Command::Knowledge { command } => commands::knowledge::run(&client, command).await,
        Command::Memory { command } => commands::memory::run(&client, command).await,
        Command::Health => commands::health::run(&client).await,
    }
}

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;

use sonja_client::SonjaClient;

use super::{print_assist, run_streaming};

#[derive(Subcommand, Debug)]
pub enum MeetingsCommand {
    /// Extract action points from a transcript and store them in memory.
    Extract {
        /// Path to a plain-text transcript.
        transcript: PathBuf,
        /// Extra instruction for the agent.
        #[arg(long)]
        prompt: Option<String>,
        /// Wait for the full answer instead of streaming steps live.
        #[arg(long)]
        no_stream: bool,
    },
}

pub async fn run(client: &SonjaClient, command: MeetingsCommand) -> anyhow::Result<()> {
    match command {
        MeetingsCommand::Extract {
            transcript,
            prompt,
            no_stream,
        } => {
            let text = std::fs::read_to_string(&transcript)
                .with_context(|| format!("reading {}", transcript.display()))?;
            if no_stream {
                let resp = client.extract_meeting(&text, prompt.as_deref()).await?;
                print_assist(&resp);
            } else {
                let outcome = run_streaming(|tx| {
                    client.extract_meeting_stream(&text, prompt.as_deref(), tx)
                })
                .await?;
                println!("\n{}", outcome.response);
            }
            Ok(())
        }
    }
}

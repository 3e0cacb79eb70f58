use anyhow::bail;
use clap::Subcommand;

use sonja_client::SonjaClient;

use super::{print_assist, run_streaming};

#[derive(Subcommand, Debug)]
pub enum CompetitorsCommand {
    /// Show the tracked competitors.
    List,
    /// Track a new competitor.
    Add { name: String },
    /// Rename a tracked competitor.
    Rename { id: String, name: String },
    /// Stop tracking a competitor.
    Remove { id: String },
    /// Run a research pass; findings land in the agent's memory.
    Analyze {
        /// Names to analyze; defaults to every enabled competitor.
        names: Vec<String>,
        /// Extra instruction for the agent.
        #[arg(long)]
        prompt: Option<String>,
        /// Wait for the full answer instead of streaming steps live.
        #[arg(long)]
        no_stream: bool,
    },
}

pub async fn run(client: &SonjaClient, command: CompetitorsCommand) -> anyhow::Result<()> {
    match command {
        CompetitorsCommand::List => {
            for c in client.competitors_list().await? {
                let state = if c.enabled { "" } else { "  (uit)" };
                println!("{}  {}{}", c.id, c.name, state);
            }
            Ok(())
        }
        CompetitorsCommand::Add { name } => {
            let c = client.competitor_add(&name).await?;
            println!("Toegevoegd: {} ({})", c.name, c.id);
            Ok(())
        }
        CompetitorsCommand::Rename { id, name } => {
            let c = client.competitor_rename(&id, &name).await?;
            println!("Hernoemd naar {}", c.name);
            Ok(())
        }
        CompetitorsCommand::Remove { id } => {
            client.competitor_delete(&id).await?;
            println!("Verwijderd: {id}");
            Ok(())
        }
        CompetitorsCommand::Analyze {
            names,
            prompt,
            no_stream,
        } => {
            let names = if names.is_empty() {
                client
                    .competitors_list()
                    .await?
                    .into_iter()
                    .filter(|c| c.enabled)
                    .map(|c| c.name)
                    .collect()
            } else {
                names
            };
            if names.is_empty() {
                bail!("no competitors to analyze; add one with `sonja competitors add`");
            }
            if no_stream {
                let resp = client
                    .analyze_competitors(&names, prompt.as_deref())
                    .await?;
                print_assist(&resp);
            } else {
                let outcome = run_streaming(|tx| {
                    client.analyze_competitors_stream(&names, prompt.as_deref(), tx)
                })
                .await?;
                println!("\n{}", outcome.response);
            }
            Ok(())
        }
    }
}

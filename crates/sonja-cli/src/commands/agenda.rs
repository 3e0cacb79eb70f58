use clap::Subcommand;

use sonja_client::{EmojiTable, SonjaClient};
use sonja_core::{AgendaKind, AgendaUpdate};

use super::fmt_instant;

#[derive(Subcommand, Debug)]
pub enum AgendaCommand {
    /// Show the scheduled items.
    List,
    /// Show one item, including its last run.
    Show { id: String },
    /// Schedule a new item.
    Add {
        title: String,
        /// Instruction the agent runs.
        #[arg(long)]
        prompt: String,
        /// once or recurring.
        #[arg(long, default_value_t = AgendaKind::Once)]
        kind: AgendaKind,
        /// ISO datetime for once, cron expression for recurring.
        #[arg(long)]
        schedule: String,
    },
    /// Change fields on an item; omitted fields keep their value.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        kind: Option<AgendaKind>,
        #[arg(long)]
        schedule: Option<String>,
    },
    /// Delete an item.
    Remove { id: String },
}

pub async fn run(client: &SonjaClient, command: AgendaCommand) -> anyhow::Result<()> {
    match command {
        AgendaCommand::List => {
            for item in client.agenda_list().await? {
                let next = item
                    .next_run_at
                    .as_deref()
                    .map(fmt_instant)
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  [{}] {}  (volgende run: {})",
                    item.id, item.kind, item.title, next
                );
            }
            Ok(())
        }
        AgendaCommand::Show { id } => {
            let item = client.agenda_get(&id).await?;
            println!("{}  [{}]", item.title, item.kind);
            println!("prompt:  {}", item.prompt);
            println!("schema:  {}", item.schedule);
            println!("gemaakt: {}", fmt_instant(&item.created_at));
            if let Some(at) = &item.last_run_at {
                println!("\nLaatste run: {}", fmt_instant(at));
            }
            if let Some(steps) = item.last_run_steps {
                let table = EmojiTable::default();
                for a in table.annotate_all(steps) {
                    println!("  {} {}", a.emoji, a.step.label());
                }
            }
            if let Some(response) = item.last_run_response {
                println!("\n{response}");
            }
            Ok(())
        }
        AgendaCommand::Add {
            title,
            prompt,
            kind,
            schedule,
        } => {
            let item = client.agenda_create(&title, &prompt, kind, &schedule).await?;
            println!("Ingepland: {} ({})", item.title, item.id);
            Ok(())
        }
        AgendaCommand::Update {
            id,
            title,
            prompt,
            kind,
            schedule,
        } => {
            let update = AgendaUpdate {
                title,
                prompt,
                kind,
                schedule,
            };
            let item = client.agenda_update(&id, &update).await?;
            println!("Bijgewerkt: {} ({})", item.title, item.id);
            Ok(())
        }
        AgendaCommand::Remove { id } => {
            client.agenda_delete(&id).await?;
            println!("Verwijderd: {id}");
            Ok(())
        }
    }
}

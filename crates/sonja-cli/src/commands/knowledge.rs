use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Subcommand;

use sonja_client::SonjaClient;

#[derive(Subcommand, Debug)]
pub enum KnowledgeCommand {
    /// Show the knowledge file names.
    List,
    /// Print a file.
    Show { name: String },
    /// Create a file from literal content.
    Create { name: String, content: String },
    /// Upload a local .md or .txt file.
    Upload { path: PathBuf },
    /// Replace a file's content.
    Edit { name: String, content: String },
    /// Delete a file.
    Remove { name: String },
    /// Rebuild the search index over knowledge and memory.
    Refresh,
}

pub async fn run(client: &SonjaClient, command: KnowledgeCommand) -> anyhow::Result<()> {
    match command {
        KnowledgeCommand::List => {
            for name in client.knowledge_list().await? {
                println!("{name}");
            }
            Ok(())
        }
        KnowledgeCommand::Show { name } => {
            println!("{}", client.knowledge_content(&name).await?);
            Ok(())
        }
        KnowledgeCommand::Create { name, content } => {
            let stored = client.knowledge_create(&name, &content).await?;
            println!("Aangemaakt: {stored}");
            Ok(())
        }
        KnowledgeCommand::Upload { path } => {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("file name is not valid UTF-8")?;
            if !name.ends_with(".md") && !name.ends_with(".txt") {
                bail!("only .md and .txt files can be uploaded");
            }
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let stored = client.knowledge_upload(name, bytes).await?;
            println!("Geüpload: {stored}");
            Ok(())
        }
        KnowledgeCommand::Edit { name, content } => {
            client.knowledge_update(&name, &content).await?;
            println!("Opgeslagen: {name}");
            Ok(())
        }
        KnowledgeCommand::Remove { name } => {
            client.knowledge_delete(&name).await?;
            println!("Verwijderd: {name}");
            Ok(())
        }
        KnowledgeCommand::Refresh => {
            let message = client.knowledge_refresh().await?;
            println!("{message}");
            Ok(())
        }
    }
}

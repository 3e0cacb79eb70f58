use clap::Subcommand;

use sonja_client::SonjaClient;

#[derive(Subcommand, Debug)]
pub enum MemoryCommand {
    /// Show the memory file names.
    List,
    /// Print a memory file.
    Show { name: String },
    /// Replace a memory file's content.
    Edit { name: String, content: String },
    /// Delete a memory file.
    Remove { name: String },
}

pub async fn run(client: &SonjaClient, command: MemoryCommand) -> anyhow::Result<()> {
    match command {
        MemoryCommand::List => {
            for name in client.memory_list().await? {
                println!("{name}");
            }
            Ok(())
        }
        MemoryCommand::Show { name } => {
            println!("{}", client.memory_content(&name).await?);
            Ok(())
        }
        MemoryCommand::Edit { name, content } => {
            client.memory_update(&name, &content).await?;
            println!("Opgeslagen: {name}");
            Ok(())
        }
        MemoryCommand::Remove { name } => {
            client.memory_delete(&name).await?;
            println!("Verwijderd: {name}");
            Ok(())
        }
    }
}

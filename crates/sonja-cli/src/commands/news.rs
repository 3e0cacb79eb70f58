use anyhow::bail;
use clap::Subcommand;
use tracing::warn;

use sonja_client::SonjaClient;
use sonja_core::NewsTask;

use super::{fmt_instant, run_streaming};

/// Shown when generation fails; mirrors the dashboard.
const GENERATE_FALLBACK: &str = "Genereren mislukt. Probeer het opnieuw.";

#[derive(Subcommand, Debug)]
pub enum NewsCommand {
    /// Show the cached news items.
    List,
    /// Generate marketing content for one news item.
    Generate {
        /// Item index from `sonja news list`.
        #[arg(long, default_value_t = 0)]
        item: usize,
        /// One of inhaker, linkedin, afas-betekenis, custom.
        #[arg(long, default_value_t = NewsTask::Inhaker)]
        task: NewsTask,
        /// Prompt override; required when task is custom.
        #[arg(long)]
        prompt: Option<String>,
        /// Wait for the result instead of streaming steps live.
        #[arg(long)]
        no_stream: bool,
    },
    /// Show or replace the RSS feeds the news page follows.
    Feeds {
        /// Replace the feed list with these URLs.
        #[arg(long = "set", value_name = "URL", num_args = 1..)]
        set: Option<Vec<String>>,
    },
    /// Show or update the default generation prompts.
    Prompts {
        #[arg(long)]
        inhaker: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        afas_betekenis: Option<String>,
    },
}

pub async fn run(client: &SonjaClient, command: NewsCommand) -> anyhow::Result<()> {
    match command {
        NewsCommand::List => {
            let list = client.news_list().await?;
            if let Some(updated) = &list.last_updated {
                println!("Laatst bijgewerkt: {}\n", fmt_instant(updated));
            }
            for (i, item) in list.items.iter().enumerate() {
                println!(
                    "[{i}] {}  ({}, {})",
                    item.title,
                    item.source,
                    fmt_instant(&item.published_at)
                );
                println!("    {}", item.summary);
            }
            Ok(())
        }
        NewsCommand::Generate {
            item,
            task,
            prompt,
            no_stream,
        } => {
            if matches!(task, NewsTask::Custom) && prompt.is_none() {
                bail!("--task custom needs --prompt");
            }
            let list = client.news_list().await?;
            let Some(news_item) = list.items.get(item) else {
                bail!("no news item at index {item} (got {} items)", list.items.len());
            };
            println!("{}  ({})\n", news_item.title, news_item.source);

            let result = if no_stream {
                client
                    .generate_news(news_item, task, prompt.as_deref())
                    .await
            } else {
                run_streaming(|tx| {
                    client.generate_news_stream(news_item, task, prompt.as_deref(), tx)
                })
                .await
                .map(|outcome| outcome.response)
            };
            match result {
                Ok(content) => println!("\n{content}"),
                Err(e) => {
                    warn!(error = %e, "news generation failed");
                    println!("{GENERATE_FALLBACK}");
                }
            }
            Ok(())
        }
        NewsCommand::Feeds { set } => {
            let urls = match set {
                Some(urls) => client.news_set_feeds(&urls).await?,
                None => client.news_feeds().await?,
            };
            for url in urls {
                println!("{url}");
            }
            Ok(())
        }
        NewsCommand::Prompts {
            inhaker,
            linkedin,
            afas_betekenis,
        } => {
            if inhaker.is_none() && linkedin.is_none() && afas_betekenis.is_none() {
                let p = client.news_prompts().await?;
                println!("inhaker:\n{}\n", p.inhaker);
                println!("linkedin:\n{}\n", p.linkedin);
                println!("afas-betekenis:\n{}", p.afas_betekenis);
                return Ok(());
            }
            let mut prompts = client.news_prompts().await?;
            if let Some(v) = inhaker {
                prompts.inhaker = v;
            }
            if let Some(v) = linkedin {
                prompts.linkedin = v;
            }
            if let Some(v) = afas_betekenis {
                prompts.afas_betekenis = v;
            }
            let _ = client.news_set_prompts(&prompts).await?;
            println!("Prompts opgeslagen.");
            Ok(())
        }
    }
}

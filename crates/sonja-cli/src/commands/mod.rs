//! Subcommand implementations, one module per operator screen.

use std::future::Future;

use tokio::sync::mpsc;

use sonja_client::{ApiError, AssistResponse, EmojiTable, StreamOutcome};
use sonja_core::ThinkingStep;

pub mod agenda;
pub mod chat;
pub mod competitors;
pub mod health;
pub mod knowledge;
pub mod meetings;
pub mod memory;
pub mod news;
pub mod website;

/// Drive a streaming assist call, printing each step as it arrives.
pub(crate) async fn run_streaming<F, Fut>(f: F) -> Result<StreamOutcome, ApiError>
where
    F: FnOnce(mpsc::Sender<ThinkingStep>) -> Fut,
    Fut: Future<Output = Result<StreamOutcome, ApiError>>,
{
    let (tx, mut rx) = mpsc::channel::<ThinkingStep>(32);
    let printer = tokio::spawn(async move {
        let table = EmojiTable::default();
        while let Some(step) = rx.recv().await {
            println!("  {} {}", table.emoji_for(&step.tool), step.label());
        }
    });
    let result = f(tx).await;
    let _ = printer.await;
    result
}

/// Render a blocking assist response: the steps taken, then the text.
pub(crate) fn print_assist(resp: &AssistResponse) {
    let table = EmojiTable::default();
    for step in &resp.steps {
        println!("  {} {}", table.emoji_for(&step.tool), step.label());
    }
    if !resp.steps.is_empty() {
        println!();
    }
    println!("{}", resp.response);
}

/// Timestamps arrive as RFC 3339 strings; unparseable values print verbatim.
pub(crate) fn fmt_instant(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%d-%m-%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

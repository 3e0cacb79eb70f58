//! Interactive chat session.

use std::io::{self, Write};

use tracing::warn;

use sonja_client::{ApiError, SonjaClient};

use super::{print_assist, run_streaming};

const WELCOME: &str = "Hoi! Ik ben Sonja, jouw digitale marketeer. Waarmee kan ik je helpen?";

/// Shown when a request fails mid-conversation; the session keeps going.
const CONNECT_FALLBACK: &str =
    "Sorry, er ging iets mis bij het verbinden met de backend. Probeer het opnieuw.";

struct Turn {
    speaker: &'static str,
    text: String,
}

pub async fn run(
    client: &SonjaClient,
    no_stream: bool,
    context_turns: usize,
) -> anyhow::Result<()> {
    println!("{WELCOME}");
    println!("(typ 'exit' om te stoppen)\n");

    let mut history: Vec<Turn> = Vec::new();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let message = input.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        let context = build_context(&history, context_turns);
        let reply = match send(client, no_stream, message, &context).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                println!("{CONNECT_FALLBACK}");
                CONNECT_FALLBACK.to_string()
            }
        };
        println!();

        history.push(Turn {
            speaker: "Gebruiker",
            text: message.to_string(),
        });
        history.push(Turn {
            speaker: "Sonja",
            text: reply,
        });
    }
    Ok(())
}

async fn send(
    client: &SonjaClient,
    no_stream: bool,
    message: &str,
    context: &str,
) -> Result<String, ApiError> {
    if no_stream {
        let resp = client.chat(message, context).await?;
        print_assist(&resp);
        Ok(resp.response)
    } else {
        let outcome = run_streaming(|tx| client.chat_stream(message, context, tx)).await?;
        println!("\n{}", outcome.response);
        Ok(outcome.response)
    }
}

/// The most recent messages, formatted the way the backend expects.
fn build_context(history: &[Turn], max_turns: usize) -> String {
    let start = history.len().saturating_sub(max_turns);
    history[start..]
        .iter()
        .map(|t| format!("{}: {}", t.speaker, t.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

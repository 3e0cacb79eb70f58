//! The five assist endpoints, blocking and streaming.
//!
//! Each capability is one POST with an endpoint-specific body; the `/stream`
//! sibling of every path emits SSE frames while the agent works. Streaming
//! variants take an [`mpsc::Sender`] and forward each step as it arrives.

use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;

use sonja_core::{NewsItem, NewsTask, ThinkingStep};

use crate::client::SonjaClient;
use crate::error::ApiError;
use crate::sse::StreamOutcome;

/// Blocking answer: the agent's response plus every step it took.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistResponse {
    pub response: String,
    #[serde(default)]
    pub steps: Vec<ThinkingStep>,
}

impl SonjaClient {
    /// POST /chat — converse with the agent. `context` carries the recent
    /// turns, already formatted by the caller.
    pub async fn chat(&self, message: &str, context: &str) -> Result<AssistResponse, ApiError> {
        self.post_assist("/chat", chat_body(message, context)).await
    }

    /// Streaming sibling of [`SonjaClient::chat`].
    pub async fn chat_stream(
        &self,
        message: &str,
        context: &str,
        tx: mpsc::Sender<ThinkingStep>,
    ) -> Result<StreamOutcome, ApiError> {
        self.post_assist_stream("/chat", chat_body(message, context), tx)
            .await
    }

    /// POST /meetings/extract — pull action points out of a transcript and
    /// store them in the agent's memory.
    pub async fn extract_meeting(
        &self,
        transcript: &str,
        custom_prompt: Option<&str>,
    ) -> Result<AssistResponse, ApiError> {
        self.post_assist("/meetings/extract", meetings_body(transcript, custom_prompt))
            .await
    }

    /// Streaming sibling of [`SonjaClient::extract_meeting`].
    pub async fn extract_meeting_stream(
        &self,
        transcript: &str,
        custom_prompt: Option<&str>,
        tx: mpsc::Sender<ThinkingStep>,
    ) -> Result<StreamOutcome, ApiError> {
        self.post_assist_stream(
            "/meetings/extract",
            meetings_body(transcript, custom_prompt),
            tx,
        )
        .await
    }

    /// POST /analyze/website — marketing review of a single URL.
    pub async fn analyze_website(
        &self,
        url: &str,
        custom_prompt: Option<&str>,
    ) -> Result<AssistResponse, ApiError> {
        self.post_assist("/analyze/website", website_body(url, custom_prompt))
            .await
    }

    /// Streaming sibling of [`SonjaClient::analyze_website`].
    pub async fn analyze_website_stream(
        &self,
        url: &str,
        custom_prompt: Option<&str>,
        tx: mpsc::Sender<ThinkingStep>,
    ) -> Result<StreamOutcome, ApiError> {
        self.post_assist_stream("/analyze/website", website_body(url, custom_prompt), tx)
            .await
    }

    /// POST /analyze/competitors — research the named competitors.
    pub async fn analyze_competitors(
        &self,
        names: &[String],
        custom_prompt: Option<&str>,
    ) -> Result<AssistResponse, ApiError> {
        self.post_assist("/analyze/competitors", competitors_body(names, custom_prompt))
            .await
    }

    /// Streaming sibling of [`SonjaClient::analyze_competitors`].
    pub async fn analyze_competitors_stream(
        &self,
        names: &[String],
        custom_prompt: Option<&str>,
        tx: mpsc::Sender<ThinkingStep>,
    ) -> Result<StreamOutcome, ApiError> {
        self.post_assist_stream(
            "/analyze/competitors",
            competitors_body(names, custom_prompt),
            tx,
        )
        .await
    }

    /// POST /news/generate — produce content for a news item. The blocking
    /// variant answers `{ content }` rather than response + steps.
    pub async fn generate_news(
        &self,
        item: &NewsItem,
        task: NewsTask,
        custom_prompt: Option<&str>,
    ) -> Result<String, ApiError> {
        let resp: NewsGenerateResponse = self
            .post_json("/news/generate", &news_body(item, task, custom_prompt))
            .await?;
        Ok(resp.content)
    }

    /// Streaming sibling of [`SonjaClient::generate_news`]; the final text
    /// lands in [`StreamOutcome::response`].
    pub async fn generate_news_stream(
        &self,
        item: &NewsItem,
        task: NewsTask,
        custom_prompt: Option<&str>,
        tx: mpsc::Sender<ThinkingStep>,
    ) -> Result<StreamOutcome, ApiError> {
        self.post_assist_stream("/news/generate", news_body(item, task, custom_prompt), tx)
            .await
    }
}

fn chat_body(message: &str, context: &str) -> serde_json::Value {
    json!({ "message": message, "context": context })
}

fn meetings_body(transcript: &str, custom_prompt: Option<&str>) -> serde_json::Value {
    with_custom_prompt(json!({ "transcript": transcript }), custom_prompt)
}

fn website_body(url: &str, custom_prompt: Option<&str>) -> serde_json::Value {
    with_custom_prompt(json!({ "url": url }), custom_prompt)
}

// This endpoint wants the key present, null when there is no prompt.
fn competitors_body(names: &[String], custom_prompt: Option<&str>) -> serde_json::Value {
    let prompt = custom_prompt.map(str::trim).filter(|p| !p.is_empty());
    json!({ "competitor_names": names, "custom_prompt": prompt })
}

fn news_body(item: &NewsItem, task: NewsTask, custom_prompt: Option<&str>) -> serde_json::Value {
    with_custom_prompt(json!({ "news_item": item, "task": task }), custom_prompt)
}

/// A blank prompt means "use the default": the field is omitted entirely.
fn with_custom_prompt(
    mut body: serde_json::Value,
    custom_prompt: Option<&str>,
) -> serde_json::Value {
    if let Some(prompt) = custom_prompt.map(str::trim).filter(|p| !p.is_empty()) {
        body["custom_prompt"] = json!(prompt);
    }
    body
}

// news/generate API response types (private — deserialization only)

#[derive(Deserialize)]
struct NewsGenerateResponse {
    content: String,
}

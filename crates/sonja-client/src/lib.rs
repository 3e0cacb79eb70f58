//! `sonja-client` — HTTP + SSE client for the Sonja backend.
//!
//! # Overview
//!
//! Every capability of the backend comes in pairs: a blocking POST that
//! returns the full answer at once, and a `/stream` sibling that emits
//! Server-Sent Events while the agent works. [`client::SonjaClient`] wraps
//! both shapes behind one connection pool; [`sse::SseDecoder`] turns raw
//! response bytes into decoded steps no matter how the network chunks them;
//! [`emoji::EmojiTable`] decorates steps before they reach a screen.
//!
//! Streaming calls take a `tokio::sync::mpsc::Sender<ThinkingStep>`: each
//! step is forwarded the moment its frame completes, and every forward
//! finishes before the call resolves with the final [`sse::StreamOutcome`].

pub mod agenda;
pub mod assist;
pub mod client;
pub mod competitors;
pub mod emoji;
pub mod error;
pub mod knowledge;
pub mod memory;
pub mod news;
pub mod sse;

pub use assist::AssistResponse;
pub use client::SonjaClient;
pub use emoji::{AnnotatedStep, EmojiTable, DEFAULT_EMOJI};
pub use error::ApiError;
pub use news::NewsList;
pub use sse::{SseDecoder, StreamOutcome};

//! HTTP transport for the Sonja backend.
//!
//! One generic routine per call shape; the endpoint modules are thin
//! parameterizations on top. Blocking requests carry the configured
//! timeout, streaming requests only a connect timeout: an agent run holds
//! the connection open for as long as it works.

use std::time::Duration;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use sonja_core::{SonjaConfig, ThinkingStep};

use crate::assist::AssistResponse;
use crate::error::ApiError;
use crate::sse::{SseDecoder, StreamOutcome};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Sonja backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SonjaClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SonjaClient {
    pub fn new(config: &SonjaConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.api.timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health — cheap reachability probe.
    pub async fn health(&self) -> Result<(), ApiError> {
        let url = format!("{}/health", self.base_url);
        self.send_checked(self.client.get(&url).timeout(self.timeout))
            .await?;
        Ok(())
    }

    /// POST a blocking assist request. The body is endpoint-specific, the
    /// answer is always the response text plus the steps taken.
    pub(crate) async fn post_assist(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<AssistResponse, ApiError> {
        self.post_json(path, &body).await
    }

    /// POST an assist request on its `/stream` sibling and decode the SSE
    /// reply, forwarding each step into `tx` the moment its frame completes.
    /// All forwards finish before this returns.
    ///
    /// A dropped receiver never aborts the call; the outcome still collects
    /// every step.
    pub(crate) async fn post_assist_stream(
        &self,
        path: &str,
        body: serde_json::Value,
        tx: mpsc::Sender<ThinkingStep>,
    ) -> Result<StreamOutcome, ApiError> {
        let url = format!("{}{}/stream", self.base_url, path);
        debug!(%url, "starting assist stream");
        let resp = self
            .send_checked(
                self.client
                    .post(&url)
                    .header("content-type", "application/json")
                    .json(&body),
            )
            .await?;

        let mut decoder = SseDecoder::new();
        let mut sent = 0usize;
        let mut byte_stream = resp.bytes_stream();

        while let Some(chunk) = byte_stream.next().await {
            let chunk = chunk?;
            for step in decoder.feed(&chunk) {
                sent += 1;
                let _ = tx.send(step).await;
            }
        }

        let outcome = decoder.finish();
        // frames rescued by the end-of-stream flush still get delivered
        for step in outcome.steps.iter().skip(sent) {
            let _ = tx.send(step.clone()).await;
        }
        Ok(outcome)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending GET request");
        let resp = self
            .send_checked(self.client.get(&url).timeout(self.timeout))
            .await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(reqwest::Method::POST, path, body).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(reqwest::Method::PUT, path, body).await
    }

    pub(crate) async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(reqwest::Method::PATCH, path, body).await
    }

    /// POST without a body, for trigger-style endpoints.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending POST request");
        let resp = self
            .send_checked(self.client.post(&url).timeout(self.timeout))
            .await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending multipart POST request");
        let resp = self
            .send_checked(self.client.post(&url).multipart(form).timeout(self.timeout))
            .await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// DELETE, discarding whatever ack body the backend sends.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending DELETE request");
        self.send_checked(self.client.delete(&url).timeout(self.timeout))
            .await?;
        Ok(())
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, method = %method, "sending request");
        let resp = self
            .send_checked(
                self.client
                    .request(method, &url)
                    .header("content-type", "application/json")
                    .json(body)
                    .timeout(self.timeout),
            )
            .await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Send and enforce the non-2xx contract: the body becomes the error
    /// message, nothing is retried.
    async fn send_checked(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = req.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiError::Unreachable(e.to_string())
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status, body = %message, "backend API error");
            return Err(ApiError::Api { status, message });
        }
        Ok(resp)
    }
}

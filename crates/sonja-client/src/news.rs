//! News surface: cached feed items plus the editable feed list and the
//! default prompts behind the quick-action buttons. Generation itself lives
//! in `assist`.

use serde::Deserialize;
use serde_json::json;

use sonja_core::{NewsItem, NewsPrompts};

use crate::client::SonjaClient;
use crate::error::ApiError;

/// GET /news answer: items from every configured feed, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsList {
    pub items: Vec<NewsItem>,
    /// When the backend last fetched the feeds; `None` before the first run.
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl SonjaClient {
    /// GET /news.
    pub async fn news_list(&self) -> Result<NewsList, ApiError> {
        self.get_json("/news").await
    }

    /// GET /news/feeds — the configured RSS feed URLs.
    pub async fn news_feeds(&self) -> Result<Vec<String>, ApiError> {
        let resp: FeedsResponse = self.get_json("/news/feeds").await?;
        Ok(resp.urls)
    }

    /// PUT /news/feeds — replace the feed list; answers the stored list.
    pub async fn news_set_feeds(&self, urls: &[String]) -> Result<Vec<String>, ApiError> {
        let resp: FeedsResponse = self
            .put_json("/news/feeds", &json!({ "urls": urls }))
            .await?;
        Ok(resp.urls)
    }

    /// GET /news/prompts.
    pub async fn news_prompts(&self) -> Result<NewsPrompts, ApiError> {
        self.get_json("/news/prompts").await
    }

    /// PUT /news/prompts — replace the default prompts.
    pub async fn news_set_prompts(&self, prompts: &NewsPrompts) -> Result<NewsPrompts, ApiError> {
        self.put_json("/news/prompts", prompts).await
    }
}

// news API response types (private — deserialization only)

#[derive(Deserialize)]
struct FeedsResponse {
    urls: Vec<String>,
}

//! Competitor list management; the analysis run itself lives in `assist`.

use serde::Deserialize;
use serde_json::json;

use sonja_core::Competitor;

use crate::client::SonjaClient;
use crate::error::ApiError;

impl SonjaClient {
    /// GET /competitors.
    pub async fn competitors_list(&self) -> Result<Vec<Competitor>, ApiError> {
        let resp: CompetitorsResponse = self.get_json("/competitors").await?;
        Ok(resp.competitors)
    }

    /// POST /competitors — add by name; answers the stored row.
    pub async fn competitor_add(&self, name: &str) -> Result<Competitor, ApiError> {
        self.post_json("/competitors", &json!({ "name": name })).await
    }

    /// PATCH /competitors/{id} — rename.
    pub async fn competitor_rename(&self, id: &str, name: &str) -> Result<Competitor, ApiError> {
        self.patch_json(&format!("/competitors/{}", id), &json!({ "name": name }))
            .await
    }

    /// DELETE /competitors/{id} — answers 204.
    pub async fn competitor_delete(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/competitors/{}", id)).await
    }
}

// competitors API response types (private — deserialization only)

#[derive(Deserialize)]
struct CompetitorsResponse {
    competitors: Vec<Competitor>,
}

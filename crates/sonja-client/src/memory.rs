//! Memory files: one markdown file per thing the agent chose to remember.
//! Only the agent creates them; operators can read, correct, and delete.

use serde::Deserialize;
use serde_json::json;

use crate::client::SonjaClient;
use crate::error::ApiError;

impl SonjaClient {
    /// GET /memory — file names only.
    pub async fn memory_list(&self) -> Result<Vec<String>, ApiError> {
        let resp: FilesResponse = self.get_json("/memory").await?;
        Ok(resp.files)
    }

    /// GET /memory/{name}.
    pub async fn memory_content(&self, filename: &str) -> Result<String, ApiError> {
        let resp: ContentResponse = self
            .get_json(&format!("/memory/{}", urlencoding::encode(filename)))
            .await?;
        Ok(resp.content)
    }

    /// PUT /memory/{name} — overwrite a memory.
    pub async fn memory_update(&self, filename: &str, content: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .put_json(
                &format!("/memory/{}", urlencoding::encode(filename)),
                &json!({ "content": content }),
            )
            .await?;
        Ok(())
    }

    /// DELETE /memory/{name}.
    pub async fn memory_delete(&self, filename: &str) -> Result<(), ApiError> {
        self.delete(&format!("/memory/{}", urlencoding::encode(filename)))
            .await
    }
}

// memory API response types (private — deserialization only)

#[derive(Deserialize)]
struct FilesResponse {
    files: Vec<String>,
}

#[derive(Deserialize)]
struct ContentResponse {
    content: String,
}

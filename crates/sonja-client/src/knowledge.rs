//! Knowledge base files: the documents behind `rag_search` and
//! `read_knowledge_file`. Names are URL-encoded in paths; the backend only
//! accepts `.md` and `.txt`.

use serde::Deserialize;
use serde_json::json;

use crate::client::SonjaClient;
use crate::error::ApiError;

impl SonjaClient {
    /// GET /knowledge — file names only.
    pub async fn knowledge_list(&self) -> Result<Vec<String>, ApiError> {
        let resp: FilesResponse = self.get_json("/knowledge").await?;
        Ok(resp.files)
    }

    /// GET /knowledge/{name}.
    pub async fn knowledge_content(&self, filename: &str) -> Result<String, ApiError> {
        let resp: ContentResponse = self
            .get_json(&format!("/knowledge/{}", urlencoding::encode(filename)))
            .await?;
        Ok(resp.content)
    }

    /// POST /knowledge/create — new document. Returns the stored name,
    /// which may differ (`.md` is appended when no extension is given).
    pub async fn knowledge_create(
        &self,
        filename: &str,
        content: &str,
    ) -> Result<String, ApiError> {
        let resp: MutationResponse = self
            .post_json(
                "/knowledge/create",
                &json!({ "filename": filename, "content": content }),
            )
            .await?;
        Ok(resp.filename)
    }

    /// POST /knowledge/upload — multipart upload of raw file bytes.
    pub async fn knowledge_upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp: MutationResponse = self.post_multipart("/knowledge/upload", form).await?;
        Ok(resp.filename)
    }

    /// PUT /knowledge/{name} — overwrite content; the index entry for this
    /// file is refreshed by the backend.
    pub async fn knowledge_update(&self, filename: &str, content: &str) -> Result<(), ApiError> {
        let _: MutationResponse = self
            .put_json(
                &format!("/knowledge/{}", urlencoding::encode(filename)),
                &json!({ "content": content }),
            )
            .await?;
        Ok(())
    }

    /// DELETE /knowledge/{name}.
    pub async fn knowledge_delete(&self, filename: &str) -> Result<(), ApiError> {
        self.delete(&format!("/knowledge/{}", urlencoding::encode(filename)))
            .await
    }

    /// POST /knowledge/refresh — rebuild the search index over knowledge and
    /// memory. Answers 503 when the vector store is down.
    pub async fn knowledge_refresh(&self) -> Result<String, ApiError> {
        let resp: RefreshResponse = self.post_empty("/knowledge/refresh").await?;
        Ok(resp.message)
    }
}

// knowledge API response types (private — deserialization only)

#[derive(Deserialize)]
struct FilesResponse {
    files: Vec<String>,
}

#[derive(Deserialize)]
struct ContentResponse {
    content: String,
}

#[derive(Deserialize)]
struct MutationResponse {
    filename: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    message: String,
}

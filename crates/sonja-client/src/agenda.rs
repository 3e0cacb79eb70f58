//! Agenda CRUD: scheduled prompts the backend runs on its own clock.

use serde_json::json;

use sonja_core::{AgendaItem, AgendaKind, AgendaUpdate};

use crate::client::SonjaClient;
use crate::error::ApiError;

impl SonjaClient {
    /// GET /agenda — every item, with `next_run_at` filled in for sorting.
    pub async fn agenda_list(&self) -> Result<Vec<AgendaItem>, ApiError> {
        self.get_json("/agenda").await
    }

    /// GET /agenda/{id}.
    pub async fn agenda_get(&self, id: &str) -> Result<AgendaItem, ApiError> {
        self.get_json(&format!("/agenda/{}", id)).await
    }

    /// POST /agenda — create a one-off or recurring item. `schedule` is an
    /// ISO datetime for `once`, a cron expression for `recurring`.
    pub async fn agenda_create(
        &self,
        title: &str,
        prompt: &str,
        kind: AgendaKind,
        schedule: &str,
    ) -> Result<AgendaItem, ApiError> {
        self.post_json(
            "/agenda",
            &json!({
                "title": title,
                "prompt": prompt,
                "type": kind,
                "schedule": schedule,
            }),
        )
        .await
    }

    /// PUT /agenda/{id} — partial update; `None` fields stay as they are.
    pub async fn agenda_update(
        &self,
        id: &str,
        update: &AgendaUpdate,
    ) -> Result<AgendaItem, ApiError> {
        self.put_json(&format!("/agenda/{}", id), update).await
    }

    /// DELETE /agenda/{id}.
    pub async fn agenda_delete(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/agenda/{}", id)).await
    }
}

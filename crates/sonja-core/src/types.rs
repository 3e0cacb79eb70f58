use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SonjaError;

/// One tool call reported by the agent while it works on a request.
///
/// The backend sends these as `step` SSE frames on streaming endpoints and
/// as a `steps` array on blocking responses. Unknown extra fields are
/// ignored so the client keeps working when the backend grows the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingStep {
    /// Tool identifier, e.g. `web_search` or `rag_search`. A payload
    /// without one decodes as the empty string rather than failing.
    #[serde(default)]
    pub tool: String,
    /// Short note about what the call did ("3 resultaten gevonden").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full label override chosen by the backend; wins over tool + summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
}

impl ThinkingStep {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            summary: None,
            display_label: None,
        }
    }

    /// The text this step renders as: `display_label` when set, otherwise
    /// `tool – summary`, otherwise the bare tool id.
    pub fn label(&self) -> String {
        if let Some(label) = &self.display_label {
            return label.clone();
        }
        match &self.summary {
            Some(summary) => format!("{} – {}", self.tool, summary),
            None => self.tool.clone(),
        }
    }
}

/// Whether an agenda item fires once or on a cron schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaKind {
    Once,
    Recurring,
}

impl fmt::Display for AgendaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgendaKind::Once => write!(f, "once"),
            AgendaKind::Recurring => write!(f, "recurring"),
        }
    }
}

impl std::str::FromStr for AgendaKind {
    type Err = SonjaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "once" => Ok(AgendaKind::Once),
            "recurring" => Ok(AgendaKind::Recurring),
            other => Err(SonjaError::Unknown {
                what: "agenda type",
                value: other.to_string(),
            }),
        }
    }
}

/// A scheduled task the agent runs on the operator's behalf.
///
/// `schedule` is an ISO datetime for `once` items and a cron expression
/// (e.g. `0 9 * * 1-5`) for `recurring` ones. Timestamps stay strings on
/// the wire; the backend computes `next_run_at` on list responses only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: String,
    pub title: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: AgendaKind,
    pub schedule: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_response: Option<String>,
    /// Tool calls from the most recent run, stored without decoration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_steps: Option<Vec<ThinkingStep>>,
}

/// Partial update for an agenda item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgendaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AgendaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// A competitor the agent tracks for analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

/// One article pulled from the configured RSS feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub source: String,
    pub published_at: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// What the agent should produce from a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsTask {
    Inhaker,
    Linkedin,
    AfasBetekenis,
    Custom,
}

impl fmt::Display for NewsTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsTask::Inhaker => write!(f, "inhaker"),
            NewsTask::Linkedin => write!(f, "linkedin"),
            NewsTask::AfasBetekenis => write!(f, "afas_betekenis"),
            NewsTask::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for NewsTask {
    type Err = SonjaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "inhaker" => Ok(NewsTask::Inhaker),
            "linkedin" => Ok(NewsTask::Linkedin),
            // kebab-case accepted so the flag reads naturally on the CLI
            "afas_betekenis" | "afas-betekenis" => Ok(NewsTask::AfasBetekenis),
            "custom" => Ok(NewsTask::Custom),
            other => Err(SonjaError::Unknown {
                what: "news task",
                value: other.to_string(),
            }),
        }
    }
}

/// Editable default prompts behind the three news quick-action buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPrompts {
    pub inhaker: String,
    pub linkedin: String,
    pub afas_betekenis: String,
}

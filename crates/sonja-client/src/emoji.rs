//! Step decoration: every tool call gets an emoji before it reaches a screen.

use std::collections::HashMap;

use serde::Serialize;

use sonja_core::ThinkingStep;

/// Emoji for tools the table does not know.
pub const DEFAULT_EMOJI: &str = "⚙️";

// Tool ids come verbatim from the backend's tool registry.
const PRODUCT_TABLE: &[(&str, &str)] = &[
    ("web_search", "🔎"),
    ("Search the internet with Serper", "🔎"),
    ("Read website content", "🌐"),
    ("scrape_website", "🌐"),
    ("read_knowledge_file", "📄"),
    ("rag_search", "🧠"),
    ("write_to_memory", "💾"),
    ("spy_competitor_research", "🕵️"),
    ("send_email", "📧"),
    ("add_agenda_item", "📅"),
    ("list_agenda_items", "📋"),
    ("update_agenda_item", "✏️"),
    ("delete_agenda_item", "🗑️"),
];

/// A step plus its display emoji, as the screens consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedStep {
    #[serde(flatten)]
    pub step: ThinkingStep,
    pub emoji: String,
}

/// Immutable tool-id → emoji mapping.
///
/// Lookup is exact and case-sensitive: a near-miss means a new backend tool,
/// not a spelling to paper over, and those fall back to [`DEFAULT_EMOJI`].
/// The table is fixed at construction; [`EmojiTable::default`] carries the
/// product mapping.
#[derive(Debug, Clone)]
pub struct EmojiTable {
    map: HashMap<String, String>,
}

impl Default for EmojiTable {
    fn default() -> Self {
        Self::new(PRODUCT_TABLE)
    }
}

impl EmojiTable {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            map: entries
                .iter()
                .map(|(tool, emoji)| (tool.to_string(), emoji.to_string()))
                .collect(),
        }
    }

    /// Emoji for a tool id, falling back to [`DEFAULT_EMOJI`].
    pub fn emoji_for(&self, tool: &str) -> &str {
        self.map.get(tool).map(String::as_str).unwrap_or(DEFAULT_EMOJI)
    }

    /// Decorate a single step.
    pub fn annotate(&self, step: ThinkingStep) -> AnnotatedStep {
        let emoji = self.emoji_for(&step.tool).to_string();
        AnnotatedStep { step, emoji }
    }

    /// Decorate a batch, preserving order. Used for the `steps` array of
    /// blocking responses and for persisted agenda run steps.
    pub fn annotate_all(&self, steps: Vec<ThinkingStep>) -> Vec<AnnotatedStep> {
        steps.into_iter().map(|step| self.annotate(step)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tools_resolve() {
        let table = EmojiTable::default();
        assert_eq!(table.emoji_for("web_search"), "🔎");
        assert_eq!(table.emoji_for("Search the internet with Serper"), "🔎");
        assert_eq!(table.emoji_for("write_to_memory"), "💾");
        assert_eq!(table.emoji_for("delete_agenda_item"), "🗑️");
    }

    #[test]
    fn unknown_tools_fall_back() {
        let table = EmojiTable::default();
        assert_eq!(table.emoji_for("brand_new_tool"), DEFAULT_EMOJI);
        assert_eq!(table.emoji_for(""), DEFAULT_EMOJI);
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let table = EmojiTable::default();
        assert_eq!(table.emoji_for("WEB_SEARCH"), DEFAULT_EMOJI);
        assert_eq!(table.emoji_for("Web_Search"), DEFAULT_EMOJI);
        assert_eq!(table.emoji_for("web search"), DEFAULT_EMOJI);
        assert_eq!(table.emoji_for(" web_search"), DEFAULT_EMOJI);
    }

    #[test]
    fn annotate_all_keeps_order() {
        let table = EmojiTable::default();
        let steps = vec![
            ThinkingStep::new("web_search"),
            ThinkingStep::new("mystery"),
            ThinkingStep::new("send_email"),
        ];
        let annotated = table.annotate_all(steps);
        assert_eq!(annotated.len(), 3);
        assert_eq!(annotated[0].emoji, "🔎");
        assert_eq!(annotated[1].emoji, DEFAULT_EMOJI);
        assert_eq!(annotated[2].emoji, "📧");
        assert_eq!(annotated[1].step.tool, "mystery");
    }

    #[test]
    fn custom_tables_are_honored() {
        let table = EmojiTable::new(&[("deploy", "🚢")]);
        assert_eq!(table.emoji_for("deploy"), "🚢");
        assert_eq!(table.emoji_for("web_search"), DEFAULT_EMOJI);
    }

    #[test]
    fn annotated_step_serializes_flat() {
        let table = EmojiTable::default();
        let annotated = table.annotate(ThinkingStep {
            tool: "rag_search".to_string(),
            summary: Some("kennisbank doorzocht".to_string()),
            display_label: None,
        });
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["tool"], "rag_search");
        assert_eq!(json["emoji"], "🧠");
        assert!(json.get("step").is_none());
    }
}

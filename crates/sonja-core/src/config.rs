use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300; // agent runs can take minutes
pub const DEFAULT_CONTEXT_TURNS: usize = 20; // chat turns sent along as context

/// Top-level config (sonja.toml + SONJA_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SonjaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Sonja backend, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for blocking requests, in seconds. Streaming requests are
    /// exempt: an agent run holds the connection open for as long as it works.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// How many of the most recent chat turns are sent as context.
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            context_turns: default_context_turns(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_context_turns() -> usize {
    DEFAULT_CONTEXT_TURNS
}

impl SonjaConfig {
    /// Load config from a TOML file with SONJA_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.sonja/sonja.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: SonjaConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("SONJA_").split("_"))
            .extract()
            .map_err(|e| crate::error::SonjaError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.sonja/sonja.toml", home)
}

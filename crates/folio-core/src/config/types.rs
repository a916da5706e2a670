use serde::{Deserialize, Serialize};

use crate::secret::Secret;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub kb: KbConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(skip)]
    pub secrets: ResolvedSecrets,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Requests per minute per client IP; 0 disables rate limiting.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            rate_limit: default_rate_limit(),
            max_body_size: default_max_body_size(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8787
}

fn default_rate_limit() -> u32 {
    120
}

fn default_max_body_size() -> usize {
    65_536
}

#[derive(Debug, Deserialize, Serialize)]
pub struct KbConfig {
    #[serde(default = "default_kb_path")]
    pub path: String,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            path: default_kb_path(),
        }
    }
}

fn default_kb_path() -> String {
    "data/kb.json".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.1
}

/// Who the assistant speaks about. Keywords extend the on-topic
/// classifier with site-specific terms (employers, project names).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersonaConfig {
    #[serde(default = "default_persona_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            email: None,
            website: None,
            keywords: Vec::new(),
        }
    }
}

fn default_persona_name() -> String {
    "the site owner".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    3
}

#[derive(Debug, Default)]
pub struct ResolvedSecrets {
    pub openai_api_key: Option<Secret>,
}

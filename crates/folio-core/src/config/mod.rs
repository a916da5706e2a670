mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Pull sensitive values from the environment.
    ///
    /// `FOLIO_OPENAI_API_KEY` takes priority over the conventional
    /// `OPENAI_API_KEY`.
    pub fn resolve_secrets(&mut self) {
        use crate::secret::Secret;

        let key = std::env::var("FOLIO_OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok();
        if let Some(val) = key {
            self.secrets.openai_api_key = Some(Secret::new(val));
        }
    }

    /// Sanity-check values the server cannot operate with.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field found.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.retrieval.top_k == 0 {
            bail!("retrieval.top_k must be at least 1");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            bail!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            );
        }
        if self.llm.max_tokens == 0 {
            bail!("llm.max_tokens must be at least 1");
        }
        if self.kb.path.is_empty() {
            bail!("kb.path must not be empty");
        }
        Ok(())
    }
}

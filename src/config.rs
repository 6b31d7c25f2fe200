use std::env;
use std::time::Duration;

use anyhow::Result;

use crate::oracle::gemini::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::session::navigation::INTRO_DELAY;

/// Central configuration loaded from environment variables.
///
/// The API key comes from the environment (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Gemini API key (GEMINI_API_KEY, falling back to API_KEY)
    pub api_key: String,
    /// Gemini endpoint base (defaults to https://generativelanguage.googleapis.com)
    pub api_url: String,
    /// Model used for classification
    pub model: String,
    /// How long the console splash screen stays up
    pub intro_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the API key, which is only checked
    /// when something actually needs the oracle.
    pub fn load() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .unwrap_or_default();

        let intro_delay = match env::var("SURAKSHA_INTRO_DELAY_MS") {
            Ok(ms) => {
                let ms: u64 = ms.trim().parse().map_err(|_| {
                    anyhow::anyhow!("SURAKSHA_INTRO_DELAY_MS must be a whole number of milliseconds, got '{ms}'")
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => INTRO_DELAY,
        };

        Ok(Self {
            api_key,
            api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: env::var("SURAKSHA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            intro_delay,
        })
    }

    /// Check that the oracle API key is configured.
    /// Call this before any operation that classifies input.
    pub fn require_oracle(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set. Add it to your .env file.\n\
                 Get a key at https://aistudio.google.com/apikey"
            );
        }
        Ok(())
    }
}

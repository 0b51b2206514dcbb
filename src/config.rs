use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_COMPOSE_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Settings store
    pub settings_path: PathBuf,

    // Generative AI provider
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub compose_model: String,
    /// Overrides the stored credential when non-empty.
    pub api_key_override: String,
    pub http_timeout_secs: u64,

    // Output
    pub output_dir: String,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            settings_path: PathBuf::from(env("SELLERPRO_SETTINGS", "sellerpro_settings.json")),
            api_base: env("GEMINI_API_BASE", DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            text_model: env("GEMINI_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            image_model: env("GEMINI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            compose_model: env("GEMINI_COMPOSE_MODEL", DEFAULT_COMPOSE_MODEL),
            api_key_override: env("GEMINI_API_KEY", ""),
            http_timeout_secs: env("HTTP_TIMEOUT_SECS", "60").parse().unwrap_or(60),
            output_dir: env("SELLERPRO_OUTPUT_DIR", "output"),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

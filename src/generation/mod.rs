pub mod gemini;
pub mod response;

pub use gemini::GeminiClient;
pub use response::{parse_json_reply, strip_code_fences};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;

/// Prompt in, generated text out. `None` on any failure; callers offer a
/// retry instead of propagating an error, and nothing is retried internally.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn generate(&self, prompt: &str, credential: &str) -> Option<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate(&self, prompt: &str, credential: &str) -> Option<Vec<u8>>;

    /// Image-conditioned synthesis from one or more reference images.
    async fn generate_from_images(
        &self,
        prompt: &str,
        images: &[ReferenceImage],
        credential: &str,
    ) -> Option<Vec<u8>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ReferenceImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let mime_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => bail!("Unsupported image type: {}", path.display()),
        };
        Ok(Self::new(mime_type, bytes))
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url.strip_prefix("data:").context("Not a data URL")?;
        let (header, payload) = rest.split_once(',').context("Data URL has no payload")?;
        let mime_type = header.split(';').next().unwrap_or_default();
        if mime_type.is_empty() || !header.ends_with(";base64") {
            bail!("Data URL must be base64 with a mime type");
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .context("Data URL payload is not valid base64")?;
        Ok(Self::new(mime_type, bytes))
    }

    pub fn base64_data(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

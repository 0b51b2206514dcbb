use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::generation::{ImageGenerationService, ReferenceImage, TextGenerationService};

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none", default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
struct PredictParameters {
    #[serde(rename = "sampleCount")]
    sample_count: u32,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
}

/// Client for the Gemini / Imagen REST endpoints.
pub struct GeminiClient {
    client: Client,
    api_base: String,
    text_model: String,
    image_model: String,
    compose_model: String,
}

impl GeminiClient {
    pub fn new(cfg: &Config) -> Self {
        let client = Client::builder()
            .timeout(cfg.http_timeout())
            .build()
            .unwrap_or_else(|e| {
                warn!("HTTP client builder failed ({}), using defaults", e);
                Client::new()
            });
        Self {
            client,
            api_base: cfg.api_base.clone(),
            text_model: cfg.text_model.clone(),
            image_model: cfg.image_model.clone(),
            compose_model: cfg.compose_model.clone(),
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        credential: &str,
    ) -> Result<R> {
        let resp = self
            .client
            .post(url)
            .query(&[("key", credential)])
            .json(body)
            .send()
            .await
            .context("Failed to reach generative API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Generative API error {}: {}", status, body);
        }

        resp.json().await.context("Failed to parse generative API response")
    }

    pub async fn generate_text(&self, prompt: &str, credential: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: None,
        };
        let url = self.endpoint(&self.text_model, "generateContent");
        let data: GenerateContentResponse = self.post(&url, &body, credential).await?;

        data.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty())
            .context("No text in generateContent response")
    }

    pub async fn generate_image(&self, prompt: &str, credential: &str) -> Result<Vec<u8>> {
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters { sample_count: 1 },
        };
        let url = self.endpoint(&self.image_model, "predict");
        let data: PredictResponse = self.post(&url, &body, credential).await?;

        let encoded = data
            .predictions
            .into_iter()
            .next()
            .and_then(|p| p.bytes_base64_encoded)
            .context("No image in predict response")?;
        STANDARD
            .decode(encoded)
            .context("Image payload is not valid base64")
    }

    pub async fn compose_image(
        &self,
        prompt: &str,
        images: &[ReferenceImage],
        credential: &str,
    ) -> Result<Vec<u8>> {
        let mut parts = vec![Part {
            text: Some(prompt.to_string()),
            inline_data: None,
        }];
        parts.extend(images.iter().map(|img| Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: img.mime_type.clone(),
                data: img.base64_data(),
            }),
        }));

        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            }),
        };
        let url = self.endpoint(&self.compose_model, "generateContent");
        let data: GenerateContentResponse = self.post(&url, &body, credential).await?;

        let encoded = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.inline_data))
            .map(|d| d.data)
            .context("No image part in generateContent response")?;
        STANDARD
            .decode(encoded)
            .context("Image payload is not valid base64")
    }
}

#[async_trait]
impl TextGenerationService for GeminiClient {
    async fn generate(&self, prompt: &str, credential: &str) -> Option<String> {
        if credential.is_empty() {
            debug!("Text generation skipped: no credential");
            return None;
        }
        match self.generate_text(prompt, credential).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Text generation failed: {:#}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ImageGenerationService for GeminiClient {
    async fn generate(&self, prompt: &str, credential: &str) -> Option<Vec<u8>> {
        if credential.is_empty() {
            debug!("Image generation skipped: no credential");
            return None;
        }
        match self.generate_image(prompt, credential).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Image generation failed: {:#}", e);
                None
            }
        }
    }

    async fn generate_from_images(
        &self,
        prompt: &str,
        images: &[ReferenceImage],
        credential: &str,
    ) -> Option<Vec<u8>> {
        if credential.is_empty() {
            debug!("Image composition skipped: no credential");
            return None;
        }
        match self.compose_image(prompt, images, credential).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Image composition failed: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::default_test_config;

    #[test]
    fn endpoints_follow_model_method_layout() {
        let client = GeminiClient::new(&default_test_config());
        assert_eq!(
            client.endpoint("gemini-x", "generateContent"),
            "http://127.0.0.1:9/v1beta/models/gemini-x:generateContent"
        );
    }

    #[test]
    fn text_request_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some("hi".to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: None,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn compose_response_finds_inline_part() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"here"},{"inlineData":{"mimeType":"image/png","data":"AAEC"}}]}}]}"#;
        let data: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let found = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.inline_data))
            .unwrap();
        assert_eq!(found.data, "AAEC");
    }

    #[tokio::test]
    async fn no_credential_means_no_call() {
        let client = GeminiClient::new(&default_test_config());
        assert!(TextGenerationService::generate(&client, "hello", "").await.is_none());
        assert!(ImageGenerationService::generate(&client, "a mug", "").await.is_none());
        assert!(client.generate_from_images("a mug", &[], "").await.is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_none() {
        let client = GeminiClient::new(&default_test_config());
        assert!(TextGenerationService::generate(&client, "hello", "key").await.is_none());
    }
}

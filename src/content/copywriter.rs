use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AssistError;
use crate::generation::{parse_json_reply, TextGenerationService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Listing,
    Social,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Listing => write!(f, "listing"),
            ContentType::Social => write!(f, "social"),
        }
    }
}

impl ContentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "listing" => Some(ContentType::Listing),
            "social" | "post" => Some(ContentType::Social),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Friendly,
    Professional,
    Urgent,
}

impl Tone {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "friendly" => Some(Tone::Friendly),
            "professional" => Some(Tone::Professional),
            "urgent" => Some(Tone::Urgent),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tone::Friendly => "เป็นกันเอง, น่ารัก, ใช้ภาษาพูด, เข้าถึงง่าย (Friendly & Casual)",
            Tone::Professional => "ทางการ, น่าเชื่อถือ, ข้อมูลแน่น, ดูพรีเมียม (Professional & Trustworthy)",
            Tone::Urgent => "ตื่นเต้น, เร่งการตัดสินใจ, Hard Sell, เน้นความคุ้มค่า (Urgent & Exciting)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBrief {
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub features: String,
    pub target_audience: String,
    pub tone: Tone,
}

/// Title/description/hashtags block returned by the copywriter prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hashtags: String,
}

pub fn content_prompt(kind: ContentType, brief: &ProductBrief, shop_info: &str) -> String {
    match kind {
        ContentType::Listing => format!(
            "You are a top E-commerce copywriter (Shopee/Lazada). Product: {}, Category: {}, Brand: {}, \
             Features: {}, Target: {}, Shop Info: {}. Tone: {}. Task: Write a Listing Description. \
             1. SEO Title (Keywords, Emoji). 2. Description (Pain point, Solution, Specs, Box content, \
             Warranty, Shop Info). 3. Hashtags. JSON Response: {{ \"title\": \"...\", \"description\": \"...\", \"hashtags\": \"...\" }}",
            brief.product_name,
            brief.category,
            brief.brand,
            brief.features,
            brief.target_audience,
            shop_info,
            brief.tone.description()
        ),
        ContentType::Social => format!(
            "You are a Social Media Content Creator. Product: {}, Features: {}, Target: {}, Tone: {}. \
             Task: Write a Social Post. 1. Headline/Hook. 2. Caption (Storytelling, Emotion, CTA). \
             3. Hashtags. JSON Response: {{ \"title\": \"...\", \"description\": \"...\", \"hashtags\": \"...\" }}",
            brief.product_name,
            brief.features,
            brief.target_audience,
            brief.tone.description()
        ),
    }
}

pub async fn generate_content(
    service: &dyn TextGenerationService,
    credential: &str,
    kind: ContentType,
    brief: &ProductBrief,
    shop_info: &str,
) -> Result<GeneratedContent, AssistError> {
    if credential.is_empty() {
        return Err(AssistError::NoCredential);
    }
    if brief.product_name.trim().is_empty() {
        return Err(AssistError::EmptyInput);
    }
    let prompt = content_prompt(kind, brief, shop_info);
    let text = service
        .generate(&prompt, credential)
        .await
        .ok_or(AssistError::NoResponse)?;
    parse_json_reply(&text).ok_or(AssistError::Unparseable)
}

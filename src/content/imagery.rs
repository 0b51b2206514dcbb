use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::error::AssistError;
use crate::generation::{ImageGenerationService, ReferenceImage};

const PRESERVE_PREFIX: &str = "(Strictly preserve main product). ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageStyle {
    #[default]
    Minimalist,
    Studio,
    Luxury,
    Nature,
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageStyle::Minimalist => write!(f, "Minimalist"),
            ImageStyle::Studio => write!(f, "Studio"),
            ImageStyle::Luxury => write!(f, "Luxury"),
            ImageStyle::Nature => write!(f, "Nature"),
        }
    }
}

impl ImageStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minimalist" => Some(ImageStyle::Minimalist),
            "studio" => Some(ImageStyle::Studio),
            "luxury" => Some(ImageStyle::Luxury),
            "nature" => Some(ImageStyle::Nature),
            _ => None,
        }
    }
}

pub fn product_image_prompt(style: ImageStyle, product: &str) -> String {
    format!("{} photography of {}, 4k, photorealistic.", style, product)
}

/// Product shot. With reference images the request is image-conditioned and
/// `preserve_product` asks the model to keep the product untouched.
pub async fn render_product_image(
    service: &dyn ImageGenerationService,
    credential: &str,
    product: &str,
    style: ImageStyle,
    references: &[ReferenceImage],
    preserve_product: bool,
) -> Result<Vec<u8>, AssistError> {
    if credential.is_empty() {
        return Err(AssistError::NoCredential);
    }
    if product.trim().is_empty() {
        return Err(AssistError::EmptyInput);
    }

    let prompt = product_image_prompt(style, product);
    let image = if references.is_empty() {
        service.generate(&prompt, credential).await
    } else {
        let prompt = if preserve_product {
            format!("{}{}", PRESERVE_PREFIX, prompt)
        } else {
            prompt
        };
        info!("Composing product image from {} reference(s)", references.len());
        service
            .generate_from_images(&prompt, references, credential)
            .await
    };
    image.ok_or(AssistError::NoResponse)
}

use crate::error::AssistError;
use crate::generation::{parse_json_reply, TextGenerationService};

pub fn smart_reply_prompt(customer_message: &str) -> String {
    format!(
        "Customer said: \"{}\". Generate 3 polite Thai replies for shop. JSON Array of strings.",
        customer_message
    )
}

pub fn video_script_prompt(product: &str) -> String {
    format!(
        "Write a viral TikTok script for \"{}\". Thai language. Table format: Time | Visual | Audio.",
        product
    )
}

/// Suggested answers to a customer chat message.
pub async fn suggest_replies(
    service: &dyn TextGenerationService,
    credential: &str,
    customer_message: &str,
) -> Result<Vec<String>, AssistError> {
    if credential.is_empty() {
        return Err(AssistError::NoCredential);
    }
    if customer_message.trim().is_empty() {
        return Err(AssistError::EmptyInput);
    }
    let text = service
        .generate(&smart_reply_prompt(customer_message), credential)
        .await
        .ok_or(AssistError::NoResponse)?;
    parse_json_reply(&text).ok_or(AssistError::Unparseable)
}

/// Short-video script as plain text.
pub async fn write_video_script(
    service: &dyn TextGenerationService,
    credential: &str,
    product: &str,
) -> Result<String, AssistError> {
    if credential.is_empty() {
        return Err(AssistError::NoCredential);
    }
    if product.trim().is_empty() {
        return Err(AssistError::EmptyInput);
    }
    service
        .generate(&video_script_prompt(product), credential)
        .await
        .ok_or(AssistError::NoResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_quote_user_text() {
        assert_eq!(
            smart_reply_prompt("Is it in stock?"),
            "Customer said: \"Is it in stock?\". Generate 3 polite Thai replies for shop. JSON Array of strings."
        );
        assert!(video_script_prompt("Mug").contains("for \"Mug\""));
    }
}

use std::path::PathBuf;

use crate::config::Config;
use crate::models::FeeStructure;

/// Config pointing at a closed local port so any real HTTP call fails fast.
pub fn default_test_config() -> Config {
    Config {
        settings_path: temp_settings_path("config"),
        api_base: "http://127.0.0.1:9/v1beta".to_string(),
        text_model: "gemini-test".to_string(),
        image_model: "imagen-test".to_string(),
        compose_model: "gemini-image-test".to_string(),
        api_key_override: String::new(),
        http_timeout_secs: 2,
        output_dir: std::env::temp_dir().to_string_lossy().into_owned(),
        log_level: "ERROR".to_string(),
    }
}

/// Unique per process and tag, so parallel tests don't share a file.
pub fn temp_settings_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "sellerpro_{}_{}.json",
        tag,
        std::process::id()
    ))
}

/// All percentages zero and no fixed fee.
pub fn zero_fees() -> FeeStructure {
    FeeStructure {
        commission_percent: 0.0,
        transaction_fee_percent: 0.0,
        service_fee_percent: 0.0,
        fixed_fee_per_order: 0.0,
        vat_registered: false,
    }
}

pub fn vat_fees() -> FeeStructure {
    FeeStructure {
        vat_registered: true,
        ..FeeStructure::default()
    }
}

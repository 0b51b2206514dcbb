use std::path::PathBuf;

use sellerpro::config::Config;
use sellerpro::models::FeeStructure;

/// Config with no key and an unreachable AI endpoint.
pub fn test_config(tag: &str) -> Config {
    let mut cfg = Config::from_env();
    cfg.settings_path = temp_path(tag).join("settings.json");
    cfg.api_base = "http://127.0.0.1:9/v1beta".to_string();
    cfg.api_key_override = String::new();
    cfg.http_timeout_secs = 2;
    cfg.output_dir = temp_path(tag).to_string_lossy().to_string();
    cfg
}

pub fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sellerpro_integ_{}_{}", tag, std::process::id()))
}

/// The marketplace defaults most scenarios start from.
pub fn shopee_fees(vat_registered: bool) -> FeeStructure {
    FeeStructure {
        commission_percent: 7.49,
        transaction_fee_percent: 3.21,
        service_fee_percent: 7.49,
        fixed_fee_per_order: 1.0,
        vat_registered,
    }
}

pub const PLAN_REPLY: &str = r#"Here is the plan:
```json
{
  "items": [
    { "name": "Ceramic Mug", "discountPercent": 10, "promoPrice": 90, "targetUnits": 40, "reason": "Hero item" },
    { "name": "plate set", "discountPercent": 5, "promoPrice": 57, "targetUnits": 20, "reason": "Bundle filler" }
  ],
  "summary": { "totalRevenue": 4740, "estimatedTotalProfit": 2000, "strategyNote": "Lead with the mug" }
}
```"#;

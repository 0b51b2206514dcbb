use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use sellerpro::config::Config;
use sellerpro::generation::GeminiClient;
use sellerpro::models::{FeeField, FeeStructure};
use sellerpro::settings::{FeeSettings, JsonFileStore, SettingsStore};

/// Process-wide state: the persisted settings plus the AI client.
/// Every fee change is written through to the store immediately.
pub struct SellerApp {
    config: Config,
    settings: FeeSettings<JsonFileStore>,
    client: GeminiClient,
}

impl SellerApp {
    pub fn new(config: Config) -> Self {
        let settings = FeeSettings::new(JsonFileStore::open(&config.settings_path));
        let client = GeminiClient::new(&config);

        info!("Settings: {}", settings.store().path().display());
        let fees = settings.fees();
        info!(
            "Fees: {:.2}% variable, ฿{:.2} fixed, VAT {}",
            fees.variable_rate() * 100.0,
            fees.fixed_fee_per_order,
            if fees.vat_registered { "on" } else { "off" }
        );

        Self {
            config,
            settings,
            client,
        }
    }

    pub fn fees(&self) -> &FeeStructure {
        self.settings.fees()
    }

    pub fn set_fee(&mut self, field: FeeField, value: f64) -> Result<()> {
        self.settings
            .set_field(field, value)
            .context("Failed to save fee structure")
    }

    pub fn set_vat(&mut self, registered: bool) -> Result<()> {
        self.settings
            .set_vat_registered(registered)
            .context("Failed to save fee structure")
    }

    pub fn reset_fees(&mut self) -> Result<()> {
        self.settings.reset().context("Failed to save fee structure")
    }

    /// `GEMINI_API_KEY` wins over the stored key.
    pub fn credential(&self) -> String {
        if !self.config.api_key_override.is_empty() {
            return self.config.api_key_override.clone();
        }
        self.settings.store().load_credential()
    }

    pub fn set_credential(&mut self, credential: &str) -> Result<()> {
        self.settings
            .store_mut()
            .save_credential(credential)
            .context("Failed to save API key")
    }

    pub fn shop_info(&self) -> String {
        self.settings.store().load_shop_info()
    }

    pub fn set_shop_info(&mut self, shop_info: &str) -> Result<()> {
        self.settings
            .store_mut()
            .save_shop_info(shop_info)
            .context("Failed to save shop info")
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    pub fn save_image(&self, bytes: &[u8]) -> Result<PathBuf> {
        let dir = PathBuf::from(&self.config.output_dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(format!("product_{}.png", Utc::now().format("%Y%m%d_%H%M%S")));
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved image ({} bytes) to {}", bytes.len(), path.display());
        Ok(path)
    }
}

//! Key-value settings persistence.
//!
//! Values are JSON, keyed by string. Reads never fail: a missing or
//! malformed entry falls back to the hard-coded default. Writes happen after
//! every change.

pub mod fees;
pub mod json_file;
pub mod memory;

pub use fees::FeeSettings;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use tracing::debug;

use crate::error::SettingsError;
use crate::models::FeeStructure;

pub const KEY_FEE_STRUCTURE: &str = "feeStructure";
pub const KEY_SHOP_INFO: &str = "shopInfo";
pub const KEY_API_CREDENTIAL: &str = "apiCredential";

pub trait SettingsStore {
    fn read(&self, key: &str) -> Option<Value>;
    fn write(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;

    fn load(&self) -> FeeStructure {
        match self.read(KEY_FEE_STRUCTURE) {
            Some(v) => serde_json::from_value(v).unwrap_or_else(|e| {
                debug!("Stored fee structure unreadable, using defaults: {}", e);
                FeeStructure::default()
            }),
            None => FeeStructure::default(),
        }
    }

    fn save(&mut self, fees: &FeeStructure) -> Result<(), SettingsError> {
        self.write(KEY_FEE_STRUCTURE, serde_json::to_value(fees)?)
    }

    fn load_shop_info(&self) -> String {
        self.read_string(KEY_SHOP_INFO)
    }

    fn save_shop_info(&mut self, shop_info: &str) -> Result<(), SettingsError> {
        self.write(KEY_SHOP_INFO, Value::String(shop_info.to_string()))
    }

    fn load_credential(&self) -> String {
        self.read_string(KEY_API_CREDENTIAL)
    }

    fn save_credential(&mut self, credential: &str) -> Result<(), SettingsError> {
        self.write(KEY_API_CREDENTIAL, Value::String(credential.trim().to_string()))
    }

    fn read_string(&self, key: &str) -> String {
        match self.read(key) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        }
    }
}

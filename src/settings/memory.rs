use serde_json::Value;
use std::collections::HashMap;

use crate::error::SettingsError;
use crate::settings::SettingsStore;

/// Volatile store, for tests and for running without a settings file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::SettingsError;
use crate::settings::SettingsStore;

/// Settings kept as one JSON object on disk, read once when opened and
/// rewritten on every change.
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_map(&path);
        debug!("Settings loaded from {} ({} keys)", path.display(), values.len());
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn load_map(path: &Path) -> Map<String, Value> {
    let Ok(content) = fs::read_to_string(path) else {
        return Map::new();
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            warn!("Settings file {} is malformed, using defaults", path.display());
            Map::new()
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

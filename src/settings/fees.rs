use tracing::info;

use crate::error::SettingsError;
use crate::models::{FeeField, FeeStructure};
use crate::settings::SettingsStore;

/// The active fee structure, written back to its store after every edit.
pub struct FeeSettings<S: SettingsStore> {
    store: S,
    fees: FeeStructure,
}

impl<S: SettingsStore> FeeSettings<S> {
    pub fn new(store: S) -> Self {
        let fees = store.load();
        Self { store, fees }
    }

    pub fn fees(&self) -> &FeeStructure {
        &self.fees
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn set_field(&mut self, field: FeeField, value: f64) -> Result<(), SettingsError> {
        self.fees.set_field(field, value);
        self.persist()
    }

    pub fn set_vat_registered(&mut self, registered: bool) -> Result<(), SettingsError> {
        self.fees.vat_registered = registered;
        self.persist()
    }

    /// Back to the marketplace defaults.
    pub fn reset(&mut self) -> Result<(), SettingsError> {
        self.fees.reset();
        info!("Fee structure reset to defaults");
        self.persist()
    }

    fn persist(&mut self) -> Result<(), SettingsError> {
        self.store.save(&self.fees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{JsonFileStore, MemoryStore};
    use crate::test_helpers::temp_settings_path;
    use std::fs;

    #[test]
    fn edits_are_written_through() {
        let mut settings = FeeSettings::new(MemoryStore::new());
        settings.set_field(FeeField::Commission, 5.5).unwrap();
        settings.set_vat_registered(true).unwrap();

        let stored = settings.store().load();
        assert_eq!(stored.commission_percent, 5.5);
        assert!(stored.vat_registered);
        assert_eq!(&stored, settings.fees());
    }

    #[test]
    fn edits_and_reset_survive_reopen() {
        let path = temp_settings_path("fee_settings")
            .with_extension("d")
            .join("settings.json");
        let _ = fs::remove_file(&path);

        {
            let mut settings = FeeSettings::new(JsonFileStore::open(&path));
            settings.set_field(FeeField::Fixed, 0.0).unwrap();
            settings.set_field(FeeField::Service, 4.0).unwrap();
        }
        let mut reopened = FeeSettings::new(JsonFileStore::open(&path));
        assert_eq!(reopened.fees().fixed_fee_per_order, 0.0);
        assert_eq!(reopened.fees().service_fee_percent, 4.0);

        reopened.reset().unwrap();
        drop(reopened);
        let after_reset = FeeSettings::new(JsonFileStore::open(&path));
        assert_eq!(after_reset.fees(), &FeeStructure::default());

        let _ = fs::remove_file(&path);
    }
}

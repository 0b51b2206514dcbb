use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMISSION_PERCENT: f64 = 7.49;
pub const DEFAULT_TRANSACTION_FEE_PERCENT: f64 = 3.21;
pub const DEFAULT_SERVICE_FEE_PERCENT: f64 = 7.49;
pub const DEFAULT_FIXED_FEE_PER_ORDER: f64 = 1.0;

/// Inclusive VAT: tax already embedded in a 7% VAT-inclusive price.
pub const VAT_NUMERATOR: f64 = 7.0;
pub const VAT_DENOMINATOR: f64 = 107.0;

/// Marketplace fee schedule. Percentages are stored "per hundred".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeStructure {
    pub commission_percent: f64,
    pub transaction_fee_percent: f64,
    pub service_fee_percent: f64,
    pub fixed_fee_per_order: f64,
    pub vat_registered: bool,
}

impl Default for FeeStructure {
    fn default() -> Self {
        Self {
            commission_percent: DEFAULT_COMMISSION_PERCENT,
            transaction_fee_percent: DEFAULT_TRANSACTION_FEE_PERCENT,
            service_fee_percent: DEFAULT_SERVICE_FEE_PERCENT,
            fixed_fee_per_order: DEFAULT_FIXED_FEE_PER_ORDER,
            vat_registered: false,
        }
    }
}

impl FeeStructure {
    /// Commission + transaction + service, as a fraction of the selling price.
    pub fn variable_rate(&self) -> f64 {
        (self.commission_percent + self.transaction_fee_percent + self.service_fee_percent) / 100.0
    }

    pub fn vat_rate(&self) -> f64 {
        if self.vat_registered {
            VAT_NUMERATOR / VAT_DENOMINATOR
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_field(&mut self, field: FeeField, value: f64) {
        match field {
            FeeField::Commission => self.commission_percent = value,
            FeeField::Transaction => self.transaction_fee_percent = value,
            FeeField::Service => self.service_fee_percent = value,
            FeeField::Fixed => self.fixed_fee_per_order = value,
        }
    }
}

/// Editable numeric fields of a [`FeeStructure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeField {
    Commission,
    Transaction,
    Service,
    Fixed,
}

impl FeeField {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "commission" | "comm" => Some(FeeField::Commission),
            "transaction" | "trans" => Some(FeeField::Transaction),
            "service" | "serv" => Some(FeeField::Service),
            "fixed" => Some(FeeField::Fixed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reset_values() {
        let mut fees = FeeStructure {
            commission_percent: 1.0,
            transaction_fee_percent: 2.0,
            service_fee_percent: 3.0,
            fixed_fee_per_order: 4.0,
            vat_registered: true,
        };
        fees.reset();
        assert_eq!(fees, FeeStructure::default());
        assert!(!fees.vat_registered);
        assert!((fees.fixed_fee_per_order - 1.0).abs() < 1e-12);
    }

    #[test]
    fn variable_rate_divides_by_hundred_once() {
        let fees = FeeStructure::default();
        assert!((fees.variable_rate() - 0.1819).abs() < 1e-12);
    }

    #[test]
    fn vat_rate_is_inclusive_formula() {
        let mut fees = FeeStructure::default();
        assert_eq!(fees.vat_rate(), 0.0);
        fees.vat_registered = true;
        assert!((fees.vat_rate() - 7.0 / 107.0).abs() < 1e-15);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let fees: FeeStructure = serde_json::from_str(r#"{"commissionPercent": 5.0}"#).unwrap();
        assert!((fees.commission_percent - 5.0).abs() < 1e-12);
        assert!((fees.transaction_fee_percent - DEFAULT_TRANSACTION_FEE_PERCENT).abs() < 1e-12);
        assert!(!fees.vat_registered);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!(FeeField::parse("Commission"), Some(FeeField::Commission));
        assert_eq!(FeeField::parse("trans"), Some(FeeField::Transaction));
        assert_eq!(FeeField::parse("vat"), None);
    }
}

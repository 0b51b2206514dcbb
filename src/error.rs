use std::io;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Percentage fees plus VAT consume the whole selling price.
    #[error(
        "cannot compute a valid price: fees {:.2}% + VAT {:.2}% reach 100% of the selling price",
        .variable_rate * 100.0,
        .vat_rate * 100.0
    )]
    InfeasibleFeeStructure { variable_rate: f64, vat_rate: f64 },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// User-facing reasons an AI-assisted action produced nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssistError {
    #[error("add at least one item to the portfolio first")]
    NoItems,
    #[error("enter a target total profit first")]
    NoTarget,
    #[error("set an API key before using AI features")]
    NoCredential,
    #[error("nothing to send")]
    EmptyInput,
    #[error("the AI service did not answer, please try again")]
    NoResponse,
    #[error("the AI answer could not be read, please try again")]
    Unparseable,
}

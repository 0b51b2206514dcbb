pub mod fees;
pub mod portfolio;
pub mod pricing;

pub use fees::{FeeField, FeeStructure};
pub use portfolio::PortfolioItem;
pub use pricing::*;

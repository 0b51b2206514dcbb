use serde::{Deserialize, Serialize};

/// A catalog item entered for a promotion campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    /// Creation timestamp in milliseconds, unique within a portfolio.
    pub id: i64,
    pub name: String,
    pub cost: f64,
    pub normal_price: f64,
}

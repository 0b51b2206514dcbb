use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcMode {
    FindPrice,
    CheckProfit,
}

impl fmt::Display for CalcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcMode::FindPrice => write!(f, "find_price"),
            CalcMode::CheckProfit => write!(f, "check_profit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitKind {
    Amount,
    PercentOfCost,
}

impl fmt::Display for ProfitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitKind::Amount => write!(f, "amount"),
            ProfitKind::PercentOfCost => write!(f, "percent"),
        }
    }
}

impl ProfitKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "amount" | "baht" => Some(ProfitKind::Amount),
            "percent" | "pct" | "%" => Some(ProfitKind::PercentOfCost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    Cheaper,
    Expensive,
    Equal,
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonStatus::Cheaper => write!(f, "cheaper"),
            ComparisonStatus::Expensive => write!(f, "expensive"),
            ComparisonStatus::Equal => write!(f, "equal"),
        }
    }
}

/// One calculation as entered by the user, already normalized to numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub mode: CalcMode,
    pub cost: f64,
    pub packaging_cost: f64,
    pub competitor_price: Option<f64>,
    /// FindPrice only.
    pub desired_profit: f64,
    /// FindPrice only.
    pub profit_kind: ProfitKind,
    /// CheckProfit only.
    pub selling_price: f64,
}

impl PricingRequest {
    pub fn find_price(cost: f64, packaging_cost: f64, desired_profit: f64, profit_kind: ProfitKind) -> Self {
        Self {
            mode: CalcMode::FindPrice,
            cost,
            packaging_cost,
            competitor_price: None,
            desired_profit,
            profit_kind,
            selling_price: 0.0,
        }
    }

    pub fn check_profit(cost: f64, packaging_cost: f64, selling_price: f64) -> Self {
        Self {
            mode: CalcMode::CheckProfit,
            cost,
            packaging_cost,
            competitor_price: None,
            desired_profit: 0.0,
            profit_kind: ProfitKind::Amount,
            selling_price,
        }
    }

    pub fn with_competitor(mut self, competitor_price: Option<f64>) -> Self {
        self.competitor_price = competitor_price;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub commission: f64,
    pub transaction: f64,
    pub service: f64,
    pub fixed: f64,
    pub vat: f64,
    pub total_fees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompetitorComparison {
    pub status: ComparisonStatus,
    pub percent_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub selling_price: f64,
    pub fee_breakdown: FeeBreakdown,
    pub net_profit: f64,
    pub margin_percent: f64,
    #[serde(default)]
    pub competitor: Option<CompetitorComparison>,
}

impl PricingResult {
    /// A loss is a valid outcome, not a failure.
    pub fn is_loss(&self) -> bool {
        self.net_profit < 0.0
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CONVERSION_RATE_PERCENT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdGoal {
    Profit,
    Sales,
    Awareness,
}

impl fmt::Display for AdGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdGoal::Profit => write!(f, "profit"),
            AdGoal::Sales => write!(f, "sales"),
            AdGoal::Awareness => write!(f, "awareness"),
        }
    }
}

impl AdGoal {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "profit" | "roi" => Some(AdGoal::Profit),
            "sales" | "volume" => Some(AdGoal::Sales),
            "awareness" | "reach" => Some(AdGoal::Awareness),
            _ => None,
        }
    }
}

/// Advertising spend thresholds beyond which per-unit profit is gone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdBreakeven {
    /// Highest cost per click that still breaks even.
    pub breakeven_cpc: f64,
    /// Lowest return on ad spend that still breaks even.
    pub breakeven_roas: f64,
}

pub fn ad_breakeven(price: f64, profit_per_unit: f64, conversion_rate_percent: f64) -> AdBreakeven {
    let cpc = profit_per_unit * (conversion_rate_percent / 100.0);
    let roas = price / profit_per_unit;
    AdBreakeven {
        breakeven_cpc: finite_or_zero(cpc),
        breakeven_roas: finite_or_zero(roas),
    }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakeven_values() {
        let b = ad_breakeven(300.0, 60.0, 2.0);
        assert!((b.breakeven_cpc - 1.2).abs() < 1e-12);
        assert!((b.breakeven_roas - 5.0).abs() < 1e-12);
    }

    #[test]
    fn zero_profit_gives_zero_roas() {
        let b = ad_breakeven(300.0, 0.0, 2.0);
        assert_eq!(b.breakeven_cpc, 0.0);
        assert_eq!(b.breakeven_roas, 0.0);

        let b = ad_breakeven(0.0, 0.0, 2.0);
        assert_eq!(b.breakeven_roas, 0.0);
    }

    #[test]
    fn goal_parsing() {
        assert_eq!(AdGoal::parse("Sales"), Some(AdGoal::Sales));
        assert_eq!(AdGoal::parse("reach"), Some(AdGoal::Awareness));
        assert_eq!(AdGoal::parse("?"), None);
    }
}

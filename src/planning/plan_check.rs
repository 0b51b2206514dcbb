use serde::{Deserialize, Serialize};

use crate::core::{compute_profit_for_given_price, Portfolio};
use crate::models::{FeeStructure, PricingResult};
use crate::planning::promo::PromoPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItemCheck {
    pub name: String,
    pub promo_price: f64,
    pub target_units: f64,
    /// Fee-model result at the promo price; `None` when the planned item
    /// does not match anything in the portfolio.
    pub per_unit: Option<PricingResult>,
    pub projected_revenue: f64,
    pub projected_profit: f64,
}

/// The AI plan re-priced locally against the real fee structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanCheck {
    pub items: Vec<PlanItemCheck>,
    pub projected_revenue: f64,
    pub projected_profit: f64,
    pub unmatched: usize,
    pub loss_making: usize,
    /// What the model claimed, for side-by-side display.
    pub claimed_profit: f64,
}

pub fn check_plan(plan: &PromoPlan, portfolio: &Portfolio, fees: &FeeStructure) -> PlanCheck {
    let mut check = PlanCheck {
        claimed_profit: plan.summary.estimated_total_profit,
        ..PlanCheck::default()
    };

    for planned in &plan.items {
        let units = planned.target_units.max(0.0);
        let revenue = planned.promo_price * units;
        let per_unit = portfolio
            .find_by_name(&planned.name)
            .map(|item| compute_profit_for_given_price(item.cost, 0.0, planned.promo_price, fees));

        let projected_profit = match &per_unit {
            Some(r) => {
                if r.is_loss() {
                    check.loss_making += 1;
                }
                r.net_profit * units
            }
            None => {
                check.unmatched += 1;
                0.0
            }
        };

        check.projected_revenue += revenue;
        check.projected_profit += projected_profit;
        check.items.push(PlanItemCheck {
            name: planned.name.clone(),
            promo_price: planned.promo_price,
            target_units: units,
            per_unit,
            projected_revenue: revenue,
            projected_profit,
        });
    }

    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::promo::{PlanSummary, PlannedItem};

    fn planned(name: &str, promo_price: f64, target_units: f64) -> PlannedItem {
        PlannedItem {
            name: name.to_string(),
            discount_percent: 0.0,
            promo_price,
            target_units,
            reason: String::new(),
        }
    }

    #[test]
    fn reprices_matched_items() {
        let mut portfolio = Portfolio::new();
        portfolio.push("Mug".to_string(), 40.0, 100.0);
        let plan = PromoPlan {
            items: vec![planned("Mug", 90.0, 10.0)],
            summary: PlanSummary {
                estimated_total_profit: 999.0,
                ..PlanSummary::default()
            },
        };
        let fees = FeeStructure::default();
        let check = check_plan(&plan, &portfolio, &fees);

        let expected_unit = compute_profit_for_given_price(40.0, 0.0, 90.0, &fees).net_profit;
        assert_eq!(check.items.len(), 1);
        assert!((check.projected_profit - expected_unit * 10.0).abs() < 1e-9);
        assert!((check.projected_revenue - 900.0).abs() < 1e-9);
        assert_eq!(check.unmatched, 0);
        assert_eq!(check.claimed_profit, 999.0);
    }

    #[test]
    fn unmatched_and_loss_items_are_counted() {
        let mut portfolio = Portfolio::new();
        portfolio.push("Mug".to_string(), 40.0, 100.0);
        let plan = PromoPlan {
            items: vec![planned("Mug", 30.0, 5.0), planned("Ghost", 50.0, 5.0)],
            summary: PlanSummary::default(),
        };
        let check = check_plan(&plan, &portfolio, &FeeStructure::default());
        assert_eq!(check.unmatched, 1);
        assert_eq!(check.loss_making, 1);
        assert!(check.items[1].per_unit.is_none());
        assert!(check.projected_profit < 0.0);
        assert!((check.projected_revenue - 400.0).abs() < 1e-9);
    }
}

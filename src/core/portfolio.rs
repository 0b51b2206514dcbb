use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::numeric::parse_optional_decimal;
use crate::models::PortfolioItem;

/// `(normal_price - cost) / normal_price * 100`, or 0 when the price is 0.
pub fn margin_percent(item: &PortfolioItem) -> f64 {
    if item.normal_price == 0.0 {
        return 0.0;
    }
    let margin = (item.normal_price - item.cost) / item.normal_price * 100.0;
    if margin.is_finite() {
        margin
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioLine {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    pub normal_price: f64,
    pub margin_percent: f64,
}

/// Aggregates over the current item list. Always computed fresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub item_count: usize,
    pub total_cost: f64,
    pub total_normal_price: f64,
    pub average_margin_percent: f64,
    pub lines: Vec<PortfolioLine>,
}

/// Campaign-scoped item list. Not persisted.
///
/// `version` increases on every add/remove so late AI responses computed
/// from an older list can be recognised and dropped.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    items: Vec<PortfolioItem>,
    version: u64,
    last_id: i64,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item from raw form input. Name, cost and price must all be
    /// present and cost/price must be numeric; otherwise nothing is added.
    pub fn add(&mut self, name: &str, cost: &str, price: &str) -> Option<&PortfolioItem> {
        let name = name.trim();
        if name.is_empty() || cost.trim().is_empty() || price.trim().is_empty() {
            debug!("Portfolio add skipped: missing field");
            return None;
        }
        let cost = parse_optional_decimal(cost)?;
        let normal_price = parse_optional_decimal(price)?;
        Some(self.push(name.to_string(), cost, normal_price))
    }

    /// Add an already-typed item.
    pub fn push(&mut self, name: String, cost: f64, normal_price: f64) -> &PortfolioItem {
        let id = self.next_id();
        self.items.push(PortfolioItem {
            id,
            name,
            cost,
            normal_price,
        });
        self.version += 1;
        debug!("Portfolio item {} added (version {})", id, self.version);
        &self.items[self.items.len() - 1]
    }

    pub fn remove(&mut self, id: i64) -> Option<PortfolioItem> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        let removed = self.items.remove(idx);
        self.version += 1;
        debug!("Portfolio item {} removed (version {})", id, self.version);
        Some(removed)
    }

    pub fn items(&self) -> &[PortfolioItem] {
        &self.items
    }

    pub fn find_by_name(&self, name: &str) -> Option<&PortfolioItem> {
        let wanted = name.trim();
        self.items
            .iter()
            .find(|i| i.name == wanted)
            .or_else(|| self.items.iter().find(|i| i.name.eq_ignore_ascii_case(wanted)))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn summary(&self) -> PortfolioSummary {
        let lines: Vec<PortfolioLine> = self
            .items
            .iter()
            .map(|i| PortfolioLine {
                id: i.id,
                name: i.name.clone(),
                cost: i.cost,
                normal_price: i.normal_price,
                margin_percent: margin_percent(i),
            })
            .collect();

        let average_margin_percent = if lines.is_empty() {
            0.0
        } else {
            lines.iter().map(|l| l.margin_percent).sum::<f64>() / lines.len() as f64
        };

        PortfolioSummary {
            item_count: lines.len(),
            total_cost: self.items.iter().map(|i| i.cost).sum(),
            total_normal_price: self.items.iter().map(|i| i.normal_price).sum(),
            average_margin_percent,
            lines,
        }
    }

    // Millisecond timestamps collide when items are added in a burst.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cost: f64, normal_price: f64) -> PortfolioItem {
        PortfolioItem {
            id: 1,
            name: "x".to_string(),
            cost,
            normal_price,
        }
    }

    #[test]
    fn margin_examples() {
        assert!((margin_percent(&item(50.0, 100.0)) - 50.0).abs() < 1e-12);
        assert_eq!(margin_percent(&item(100.0, 100.0)), 0.0);
        assert!((margin_percent(&item(150.0, 100.0)) + 50.0).abs() < 1e-12);
    }

    #[test]
    fn zero_price_margin_is_zero() {
        assert_eq!(margin_percent(&item(50.0, 0.0)), 0.0);
        assert_eq!(margin_percent(&item(0.0, 0.0)), 0.0);
    }

    #[test]
    fn add_requires_all_fields() {
        let mut p = Portfolio::new();
        assert!(p.add("", "10", "20").is_none());
        assert!(p.add("Mug", "", "20").is_none());
        assert!(p.add("Mug", "10", "  ").is_none());
        assert!(p.add("Mug", "abc", "20").is_none());
        assert!(p.add("Mug", "10", "twenty").is_none());
        assert!(p.is_empty());
        assert_eq!(p.version(), 0);

        let added = p.add("  Mug ", "10", "20").unwrap().clone();
        assert_eq!(added.name, "Mug");
        assert_eq!(added.cost, 10.0);
        assert_eq!(added.normal_price, 20.0);
        assert_eq!(p.len(), 1);
        assert_eq!(p.version(), 1);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut p = Portfolio::new();
        let ids: Vec<i64> = (0..5).map(|i| p.push(format!("item{}", i), 1.0, 2.0).id).collect();
        for w in ids.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn remove_by_id() {
        let mut p = Portfolio::new();
        let a = p.push("A".to_string(), 1.0, 2.0).id;
        let b = p.push("B".to_string(), 3.0, 4.0).id;
        assert_eq!(p.version(), 2);

        let removed = p.remove(a).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(p.items().len(), 1);
        assert_eq!(p.items()[0].id, b);
        assert_eq!(p.version(), 3);

        assert!(p.remove(a).is_none());
        assert_eq!(p.version(), 3);
    }

    #[test]
    fn summary_recomputes_each_call() {
        let mut p = Portfolio::new();
        p.push("A".to_string(), 50.0, 100.0);
        p.push("B".to_string(), 100.0, 100.0);
        let s = p.summary();
        assert_eq!(s.item_count, 2);
        assert!((s.average_margin_percent - 25.0).abs() < 1e-12);
        assert!((s.total_cost - 150.0).abs() < 1e-12);
        assert!((s.total_normal_price - 200.0).abs() < 1e-12);

        p.push("C".to_string(), 0.0, 0.0);
        let s = p.summary();
        assert_eq!(s.item_count, 3);
        assert!((s.average_margin_percent - 50.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_summary() {
        let s = Portfolio::new().summary();
        assert_eq!(s.item_count, 0);
        assert_eq!(s.average_margin_percent, 0.0);
    }

    #[test]
    fn find_by_name_falls_back_to_case_insensitive() {
        let mut p = Portfolio::new();
        p.push("Phone Case".to_string(), 20.0, 99.0);
        assert!(p.find_by_name("Phone Case").is_some());
        assert!(p.find_by_name("phone case ").is_some());
        assert!(p.find_by_name("Charger").is_none());
    }
}

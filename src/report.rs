//! Console rendering of calculation results.

use crate::core::ads::AdBreakeven;
use crate::core::portfolio::PortfolioSummary;
use crate::models::{ComparisonStatus, FeeStructure, PricingResult};
use crate::planning::{PlanCheck, PromoPlan};

const RULE: &str = "  ───────────────────────────────────";

fn header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}", "=".repeat(60));
}

pub fn print_fee_structure(fees: &FeeStructure) {
    header("FEE STRUCTURE");
    println!("  Commission:  {:.2}%", fees.commission_percent);
    println!("  Transaction: {:.2}%", fees.transaction_fee_percent);
    println!("  Service:     {:.2}%", fees.service_fee_percent);
    println!("  Fixed:       ฿{:.2} / order", fees.fixed_fee_per_order);
    println!(
        "  VAT:         {}",
        if fees.vat_registered { "registered (7%)" } else { "not registered" }
    );
    println!("  Variable:    {:.2}% of price", fees.variable_rate() * 100.0);
}

pub fn print_pricing(result: &PricingResult) {
    header("PRICING");
    println!("  Selling price: ฿{:.2}", result.selling_price);
    println!();
    println!("  FEES");
    println!("{}", RULE);
    let b = &result.fee_breakdown;
    println!("  Commission:  ฿{:.2}", b.commission);
    println!("  Transaction: ฿{:.2}", b.transaction);
    println!("  Service:     ฿{:.2}", b.service);
    println!("  Fixed:       ฿{:.2}", b.fixed);
    if b.vat > 0.0 {
        println!("  VAT:         ฿{:.2}", b.vat);
    }
    println!("  Total:       ฿{:.2}", b.total_fees);
    println!();
    println!("  RESULT");
    println!("{}", RULE);
    println!("  Net profit:  ฿{:+.2}", result.net_profit);
    println!("  Margin:      {:.1}%", result.margin_percent);
    if result.is_loss() {
        println!("  WARNING: this price sells at a loss");
    }

    if let Some(c) = &result.competitor {
        println!();
        println!("  COMPETITOR");
        println!("{}", RULE);
        match c.status {
            ComparisonStatus::Cheaper => println!("  Cheaper by {:.2}%", c.percent_delta.abs()),
            ComparisonStatus::Expensive => println!("  More expensive by {:.2}%", c.percent_delta),
            ComparisonStatus::Equal => println!("  Same price"),
        }
    }
}

pub fn print_portfolio(summary: &PortfolioSummary) {
    header("PORTFOLIO");
    if summary.lines.is_empty() {
        println!("  (no items)");
        return;
    }
    for line in &summary.lines {
        println!(
            "  #{} {:<20} cost ฿{:>9.2} | price ฿{:>9.2} | margin {:>6.1}%",
            line.id, line.name, line.cost, line.normal_price, line.margin_percent
        );
    }
    println!("{}", RULE);
    println!("  Items:       {}", summary.item_count);
    println!("  Avg margin:  {:.1}%", summary.average_margin_percent);
}

pub fn print_plan(plan: &PromoPlan) {
    header("PROMOTION PLAN");
    for item in &plan.items {
        println!(
            "  {:<20} -{:.0}% → ฿{:.2} x {:.0}  {}",
            item.name, item.discount_percent, item.promo_price, item.target_units, item.reason
        );
    }
    println!("{}", RULE);
    println!("  Revenue:     ฿{:.2}", plan.summary.total_revenue);
    println!("  Profit:      ฿{:.2}", plan.summary.estimated_total_profit);
    if !plan.summary.strategy_note.is_empty() {
        println!("  Note:        {}", plan.summary.strategy_note);
    }
}

pub fn print_plan_check(check: &PlanCheck) {
    println!();
    println!("  LOCAL CHECK");
    println!("{}", RULE);
    for item in &check.items {
        match &item.per_unit {
            Some(unit) => println!(
                "  {:<20} ฿{:+.2}/unit → ฿{:+.2}",
                item.name, unit.net_profit, item.projected_profit
            ),
            None => println!("  {:<20} not in portfolio", item.name),
        }
    }
    println!("  Revenue:     ฿{:.2}", check.projected_revenue);
    println!(
        "  Profit:      ฿{:+.2} (model said ฿{:.2})",
        check.projected_profit, check.claimed_profit
    );
    if check.loss_making > 0 {
        println!("  WARNING: {} item(s) priced below break-even", check.loss_making);
    }
    if check.unmatched > 0 {
        println!("  {} planned item(s) not found in portfolio", check.unmatched);
    }
}

pub fn print_ad_breakeven(b: &AdBreakeven, conversion_rate_percent: f64) {
    header("ADS BREAK-EVEN");
    println!("  Conversion:  {:.2}%", conversion_rate_percent);
    println!("  Max CPC:     ฿{:.2}", b.breakeven_cpc);
    println!("  Min ROAS:    {:.2}", b.breakeven_roas);
}

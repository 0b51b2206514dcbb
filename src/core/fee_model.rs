use crate::error::PricingError;
use crate::models::{
    CalcMode, ComparisonStatus, CompetitorComparison, FeeBreakdown, FeeStructure, PricingRequest,
    PricingResult, ProfitKind,
};

/// Solve for the selling price that leaves `desired_profit` after every fee.
///
/// Percentage fees and VAT are both levied on the unknown price, so the
/// price is `(cost + packaging + profit + fixed) / (1 - variable_rate - vat_rate)`.
/// A non-positive denominator means the fees eat the whole price and no
/// price exists.
pub fn compute_selling_price_for_target_profit(
    cost: f64,
    packaging_cost: f64,
    desired_profit: f64,
    profit_kind: ProfitKind,
    fees: &FeeStructure,
) -> Result<PricingResult, PricingError> {
    let desired_amount = match profit_kind {
        ProfitKind::Amount => desired_profit,
        ProfitKind::PercentOfCost => cost * desired_profit / 100.0,
    };

    let total_cost = cost + packaging_cost;
    let variable_rate = fees.variable_rate();
    let vat_rate = fees.vat_rate();
    let denominator = 1.0 - variable_rate - vat_rate;

    if denominator <= 0.0 {
        return Err(PricingError::InfeasibleFeeStructure {
            variable_rate,
            vat_rate,
        });
    }

    let selling_price = (total_cost + desired_amount + fees.fixed_fee_per_order) / denominator;
    Ok(compute_profit_for_given_price(
        cost,
        packaging_cost,
        selling_price,
        fees,
    ))
}

/// Forward calculation: every fee at `selling_price` and what is left over.
pub fn compute_profit_for_given_price(
    cost: f64,
    packaging_cost: f64,
    selling_price: f64,
    fees: &FeeStructure,
) -> PricingResult {
    let commission = selling_price * fees.commission_percent / 100.0;
    let transaction = selling_price * fees.transaction_fee_percent / 100.0;
    let service = selling_price * fees.service_fee_percent / 100.0;
    let vat = selling_price * fees.vat_rate();
    let fixed = fees.fixed_fee_per_order;
    let total_fees = commission + transaction + service + fixed + vat;

    let net_received = selling_price - total_fees - packaging_cost;
    let net_profit = net_received - cost;
    let margin_percent = if selling_price > 0.0 {
        net_profit / selling_price * 100.0
    } else {
        0.0
    };

    PricingResult {
        selling_price,
        fee_breakdown: FeeBreakdown {
            commission,
            transaction,
            service,
            fixed,
            vat,
            total_fees,
        },
        net_profit,
        margin_percent,
        competitor: None,
    }
}

/// Three-way comparison against a competitor's listing. Ties are exact.
///
/// A missing, zero, negative or non-finite competitor price gives no
/// comparison, since the percentage delta would be undefined.
pub fn compare_to_competitor(
    selling_price: f64,
    competitor_price: Option<f64>,
) -> Option<CompetitorComparison> {
    let competitor = competitor_price.filter(|p| p.is_finite() && *p > 0.0)?;

    let diff = selling_price - competitor;
    let percent_delta = diff / competitor * 100.0;
    let status = if diff > 0.0 {
        ComparisonStatus::Expensive
    } else if diff < 0.0 {
        ComparisonStatus::Cheaper
    } else {
        ComparisonStatus::Equal
    };

    Some(CompetitorComparison {
        status,
        percent_delta,
    })
}

/// Run a full request: dispatch on mode, then attach the competitor check.
pub fn compute(request: &PricingRequest, fees: &FeeStructure) -> Result<PricingResult, PricingError> {
    let mut result = match request.mode {
        CalcMode::FindPrice => compute_selling_price_for_target_profit(
            request.cost,
            request.packaging_cost,
            request.desired_profit,
            request.profit_kind,
            fees,
        )?,
        CalcMode::CheckProfit => compute_profit_for_given_price(
            request.cost,
            request.packaging_cost,
            request.selling_price,
            fees,
        ),
    };
    result.competitor = compare_to_competitor(result.selling_price, request.competitor_price);
    Ok(result)
}

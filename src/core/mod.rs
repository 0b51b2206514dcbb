pub mod ads;
pub mod fee_model;
pub mod numeric;
pub mod portfolio;

pub use fee_model::{
    compare_to_competitor, compute, compute_profit_for_given_price,
    compute_selling_price_for_target_profit,
};
pub use numeric::{parse_decimal_or_zero, parse_optional_decimal};
pub use portfolio::{margin_percent, Portfolio};

use crate::core::ads::AdGoal;
use crate::error::AssistError;
use crate::generation::TextGenerationService;

fn goal_label(goal: AdGoal) -> &'static str {
    match goal {
        AdGoal::Profit => "เน้นกำไร (ROI)",
        AdGoal::Sales => "เน้นยอดขาย (Volume)",
        AdGoal::Awareness => "เน้นการมองเห็น",
    }
}

pub fn ad_advice_prompt(price: f64, profit_per_unit: f64, conversion_rate_percent: f64, goal: AdGoal) -> String {
    format!(
        "Analyze Ads Strategy. Product Price: {}, Profit/unit: {}, Target CR: {}%, Goal: {}. \
         Provide 1. Risk Analysis 2. Bidding Strategy 3. Budget Advice 4. Special Tip. In Thai.",
        price,
        profit_per_unit,
        conversion_rate_percent,
        goal_label(goal)
    )
}

/// Free-text advertising advice for a product's economics.
pub async fn advise_ads(
    service: &dyn TextGenerationService,
    credential: &str,
    price: f64,
    profit_per_unit: f64,
    conversion_rate_percent: f64,
    goal: AdGoal,
) -> Result<String, AssistError> {
    if credential.is_empty() {
        return Err(AssistError::NoCredential);
    }
    let prompt = ad_advice_prompt(price, profit_per_unit, conversion_rate_percent, goal);
    service
        .generate(&prompt, credential)
        .await
        .ok_or(AssistError::NoResponse)
}

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::core::Portfolio;
use crate::error::AssistError;
use crate::generation::{parse_json_reply, TextGenerationService};
use crate::models::PortfolioItem;
use crate::planning::guard::{RequestGuard, RequestTicket};

pub const DEFAULT_DURATION_DAYS: u32 = 7;
pub const DEFAULT_PLATFORM: &str = "Shopee";
pub const CHAT_GREETING: &str = "สวัสดีครับ ผมช่วยวางแผนโปรโมชั่นได้นะ";
pub const CHAT_ERROR_TEXT: &str = "Error calling AI";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedItem {
    pub name: String,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub promo_price: f64,
    #[serde(default)]
    pub target_units: f64,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub estimated_total_profit: f64,
    #[serde(default)]
    pub strategy_note: String,
}

/// Discount/allocation plan as returned by the text model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoPlan {
    pub items: Vec<PlannedItem>,
    #[serde(default)]
    pub summary: PlanSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignGoal {
    pub target_total_profit: Option<f64>,
    pub duration_days: u32,
    pub platform: String,
}

impl Default for CampaignGoal {
    fn default() -> Self {
        Self {
            target_total_profit: None,
            duration_days: DEFAULT_DURATION_DAYS,
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Ai => write!(f, "ai"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// An in-flight plan request: the prompt plus what it was computed from.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub ticket: RequestTicket,
    pub portfolio_version: u64,
    /// Goal as it was when the prompt was built.
    pub goal: CampaignGoal,
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanUpdate {
    Applied,
    /// A newer request was issued, or the items or goal changed meanwhile.
    Stale,
    NoResponse,
    Unparseable,
}

pub fn plan_prompt(items: &[PortfolioItem], goal: &CampaignGoal, target_total_profit: f64) -> String {
    let items_context = items
        .iter()
        .map(|i| format!("- {}: Cost {}, Price {}", i.name, i.cost, i.normal_price))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "AI Campaign Manager. Platform: {}. Goal Profit: {} in {} days. Items: {}. \
         Plan discount strategy & sales volume. JSON Response: {{ \"items\": [{{ \"name\": \"...\", \
         \"discountPercent\": 10, \"promoPrice\": 100, \"targetUnits\": 50, \"reason\": \"...\" }}], \
         \"summary\": {{ \"totalRevenue\": 1000, \"estimatedTotalProfit\": 500, \"strategyNote\": \"...\" }} }}",
        goal.platform, target_total_profit, goal.duration_days, items_context
    )
}

pub fn chat_prompt(message: &str, item_count: usize) -> String {
    format!(
        "Consultant for Ecommerce. User asked: {}. Context: {} items. Answer in Thai.",
        message, item_count
    )
}

/// Campaign workspace: the item list, the goal, the latest accepted plan
/// and the consultant chat.
pub struct PromotionPlanner {
    portfolio: Portfolio,
    pub goal: CampaignGoal,
    plan: Option<PromoPlan>,
    guard: RequestGuard,
    chat: Vec<ChatMessage>,
}

impl Default for PromotionPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PromotionPlanner {
    pub fn new() -> Self {
        Self {
            portfolio: Portfolio::new(),
            goal: CampaignGoal::default(),
            plan: None,
            guard: RequestGuard::new(),
            chat: vec![ChatMessage {
                role: ChatRole::Ai,
                text: CHAT_GREETING.to_string(),
            }],
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn add_item(&mut self, name: &str, cost: &str, price: &str) -> Option<&PortfolioItem> {
        self.portfolio.add(name, cost, price)
    }

    pub fn remove_item(&mut self, id: i64) -> Option<PortfolioItem> {
        self.portfolio.remove(id)
    }

    pub fn plan(&self) -> Option<&PromoPlan> {
        self.plan.as_ref()
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    /// Build the plan prompt and take a ticket for it.
    pub fn prepare_plan(&self, credential: &str) -> Result<PlanRequest, AssistError> {
        if self.portfolio.is_empty() {
            return Err(AssistError::NoItems);
        }
        let target = self.goal.target_total_profit.ok_or(AssistError::NoTarget)?;
        if credential.is_empty() {
            return Err(AssistError::NoCredential);
        }

        Ok(PlanRequest {
            ticket: self.guard.begin(),
            portfolio_version: self.portfolio.version(),
            goal: self.goal.clone(),
            prompt: plan_prompt(self.portfolio.items(), &self.goal, target),
        })
    }

    /// Apply a reply to an earlier request, unless it has gone stale.
    pub fn accept_plan(&mut self, request: &PlanRequest, reply: Option<String>) -> PlanUpdate {
        if !self.guard.is_current(request.ticket)
            || self.portfolio.version() != request.portfolio_version
            || self.goal != request.goal
        {
            debug!(
                "Discarding stale plan reply (ticket {}, version {} vs {})",
                request.ticket.id(),
                request.portfolio_version,
                self.portfolio.version()
            );
            return PlanUpdate::Stale;
        }

        let Some(text) = reply else {
            return PlanUpdate::NoResponse;
        };

        match parse_json_reply::<PromoPlan>(&text) {
            Some(plan) => {
                info!("Promotion plan accepted: {} items", plan.items.len());
                self.plan = Some(plan);
                PlanUpdate::Applied
            }
            None => PlanUpdate::Unparseable,
        }
    }

    pub async fn generate_plan(
        &mut self,
        service: &dyn TextGenerationService,
        credential: &str,
    ) -> Result<PlanUpdate, AssistError> {
        let request = self.prepare_plan(credential)?;
        let reply = service.generate(&request.prompt, credential).await;
        Ok(self.accept_plan(&request, reply))
    }

    /// Ask the consultant. The user message is kept even when the call fails.
    pub async fn send_chat(
        &mut self,
        service: &dyn TextGenerationService,
        credential: &str,
        message: &str,
    ) -> Result<&ChatMessage, AssistError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistError::EmptyInput);
        }
        if credential.is_empty() {
            return Err(AssistError::NoCredential);
        }

        self.chat.push(ChatMessage {
            role: ChatRole::User,
            text: message.to_string(),
        });
        let prompt = chat_prompt(message, self.portfolio.len());
        let reply = service
            .generate(&prompt, credential)
            .await
            .unwrap_or_else(|| CHAT_ERROR_TEXT.to_string());
        self.chat.push(ChatMessage {
            role: ChatRole::Ai,
            text: reply,
        });
        Ok(&self.chat[self.chat.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"```json
{ "items": [{ "name": "Mug", "discountPercent": 10, "promoPrice": 90, "targetUnits": 50, "reason": "hero item" }],
  "summary": { "totalRevenue": 4500, "estimatedTotalProfit": 1200, "strategyNote": "Lead with the mug" } }
```"#;

    fn planner_with_items() -> PromotionPlanner {
        let mut p = PromotionPlanner::new();
        p.add_item("Mug", "40", "100").unwrap();
        p.add_item("Plate", "25", "60").unwrap();
        p.goal.target_total_profit = Some(5000.0);
        p
    }

    #[test]
    fn prompt_lists_items_and_goal() {
        let p = planner_with_items();
        let req = p.prepare_plan("key").unwrap();
        assert!(req.prompt.contains("Platform: Shopee"));
        assert!(req.prompt.contains("Goal Profit: 5000 in 7 days"));
        assert!(req.prompt.contains("- Mug: Cost 40, Price 100\n- Plate: Cost 25, Price 60"));
        assert!(req.prompt.contains("\"discountPercent\": 10"));
    }

    #[test]
    fn prepare_requires_items_target_and_key() {
        let mut p = PromotionPlanner::new();
        assert_eq!(p.prepare_plan("key").unwrap_err(), AssistError::NoItems);
        p.add_item("Mug", "40", "100");
        assert_eq!(p.prepare_plan("key").unwrap_err(), AssistError::NoTarget);
        p.goal.target_total_profit = Some(100.0);
        assert_eq!(p.prepare_plan("").unwrap_err(), AssistError::NoCredential);
        assert!(p.prepare_plan("key").is_ok());
    }

    #[test]
    fn current_reply_is_applied() {
        let mut p = planner_with_items();
        let req = p.prepare_plan("key").unwrap();
        assert_eq!(p.accept_plan(&req, Some(PLAN_JSON.to_string())), PlanUpdate::Applied);
        let plan = p.plan().unwrap();
        assert_eq!(plan.items[0].name, "Mug");
        assert_eq!(plan.items[0].target_units, 50.0);
        assert_eq!(plan.summary.strategy_note, "Lead with the mug");
    }

    #[test]
    fn reply_after_item_change_is_stale() {
        let mut p = planner_with_items();
        let req = p.prepare_plan("key").unwrap();
        p.add_item("Bowl", "10", "30");
        assert_eq!(p.accept_plan(&req, Some(PLAN_JSON.to_string())), PlanUpdate::Stale);
        assert!(p.plan().is_none());
    }

    #[test]
    fn reply_after_goal_change_is_stale() {
        let mut p = planner_with_items();
        let req = p.prepare_plan("key").unwrap();
        p.goal.target_total_profit = Some(100.0);
        p.goal.duration_days = 30;
        assert_eq!(p.accept_plan(&req, Some(PLAN_JSON.to_string())), PlanUpdate::Stale);
        assert!(p.plan().is_none());

        let mut p = planner_with_items();
        let req = p.prepare_plan("key").unwrap();
        p.goal.platform = "Lazada".to_string();
        assert_eq!(p.accept_plan(&req, Some(PLAN_JSON.to_string())), PlanUpdate::Stale);
    }

    #[test]
    fn superseded_reply_is_stale() {
        let mut p = planner_with_items();
        let first = p.prepare_plan("key").unwrap();
        let second = p.prepare_plan("key").unwrap();
        assert_eq!(p.accept_plan(&first, Some(PLAN_JSON.to_string())), PlanUpdate::Stale);
        assert_eq!(p.accept_plan(&second, Some(PLAN_JSON.to_string())), PlanUpdate::Applied);
    }

    #[test]
    fn missing_or_garbled_reply() {
        let mut p = planner_with_items();
        let req = p.prepare_plan("key").unwrap();
        assert_eq!(p.accept_plan(&req, None), PlanUpdate::NoResponse);
        assert_eq!(
            p.accept_plan(&req, Some("I could not build a plan".to_string())),
            PlanUpdate::Unparseable
        );
        assert!(p.plan().is_none());
    }

    #[test]
    fn chat_starts_with_greeting() {
        let p = PromotionPlanner::new();
        assert_eq!(p.chat().len(), 1);
        assert_eq!(p.chat()[0].role, ChatRole::Ai);
    }

    #[test]
    fn chat_prompt_mentions_item_count() {
        assert_eq!(
            chat_prompt("Which item should lead?", 3),
            "Consultant for Ecommerce. User asked: Which item should lead?. Context: 3 items. Answer in Thai."
        );
    }
}

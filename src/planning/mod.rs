pub mod guard;
pub mod plan_check;
pub mod promo;

pub use guard::{RequestGuard, RequestTicket};
pub use plan_check::{check_plan, PlanCheck};
pub use promo::{CampaignGoal, ChatMessage, ChatRole, PlanUpdate, PromoPlan, PromotionPlanner};

pub mod activities;
pub mod models;

pub use activities::{get_usage, get_usage_at, try_increment, try_increment_at};
pub use models::{Tier, UsageRecord};

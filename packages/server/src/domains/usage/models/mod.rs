pub mod usage_record;

pub use usage_record::{
    next_reset, Tier, UsageRecord, FREE_TIER_LIMIT, PRO_TIER_LIMIT, RESET_WINDOW_DAYS,
};

pub mod ledger;

pub use ledger::{get_usage, get_usage_at, try_increment, try_increment_at};

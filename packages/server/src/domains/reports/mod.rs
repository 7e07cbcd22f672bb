pub mod models;

pub use models::{Report, MAX_STORED_CONTENT_CHARS};

/// Default and maximum page sizes for report listings.
pub const DEFAULT_REPORT_LIMIT: usize = 10;
pub const MAX_REPORT_LIMIT: usize = 100;

/// Clamp a caller-supplied listing size into `1..=MAX_REPORT_LIMIT`.
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_REPORT_LIMIT,
        Some(n) => n.clamp(1, MAX_REPORT_LIMIT as i64) as usize,
    }
}

pub mod report;

pub use report::{Report, MAX_STORED_CONTENT_CHARS};

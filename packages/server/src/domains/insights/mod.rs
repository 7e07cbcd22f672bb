pub mod activities;
pub mod error;
pub mod models;
pub mod prompts;

pub use activities::{draft_email, generate_insights};
pub use error::GenerationError;
pub use models::{EmailDraft, InsightSet};

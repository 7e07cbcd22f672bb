pub mod generate;

pub use generate::{draft_email, generate_insights, MAX_EMAIL_CONTEXT_CHARS, MAX_INSIGHT_INPUT_CHARS};

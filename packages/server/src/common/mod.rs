// Common types and utilities shared across the application

pub mod entity_ids;
pub mod id;
pub mod session;

pub use entity_ids::*;
pub use id::Id;
pub use session::{read_session, write_session, ANONYMOUS_SESSION};

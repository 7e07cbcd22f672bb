// HTTP routes
pub mod analyze;
pub mod email;
pub mod health;
pub mod reports;
pub mod usage;

pub use analyze::*;
pub use email::*;
pub use health::*;
pub use reports::*;
pub use usage::*;

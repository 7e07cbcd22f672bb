//! Usage and report storage backends.
//!
//! - `MemoryStore` - tests and local development
//! - `PostgresStore` - production

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

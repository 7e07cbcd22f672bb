//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use ai::CompletionAI;
pub use deps::ServerDeps;
pub use stores::{MemoryStore, PostgresStore};
pub use test_dependencies::{MockAI, TestDependencies};
pub use traits::*;

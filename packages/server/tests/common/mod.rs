// Common test utilities
#![allow(dead_code)]

pub mod app;
pub mod harness;

pub use app::*;
pub use harness::*;

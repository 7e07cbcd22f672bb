// Lead Research API - Core
//
// Turns a web page or PDF into sales-outreach insights, metered by a
// per-session usage quota. Domains live in domains/*, infrastructure in
// kernel/, and the axum surface in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;

// Business domains
pub mod insights;
pub mod reports;
pub mod research;
pub mod usage;

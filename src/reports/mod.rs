//! Reports module for fintrack
//!
//! Provides read-only summaries computed from the ledger.

pub mod summary;

pub use summary::{CategorySpending, MonthlySummary};

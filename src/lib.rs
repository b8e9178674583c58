//! fintrack - a personal finance ledger for the terminal
//!
//! Records incomes and expenses by category and date, caps spending per
//! category with budgets, and exports the ledger to CSV or JSON.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Home directory and settings
//! - `error`: Custom error types
//! - `models`: Records, categories, budgets and months
//! - `storage`: The newest-first record lists, the budget book, and atomic file writes
//! - `services`: The finance manager, which owns all ledger state
//! - `reports`: Summaries over the ledger
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export, JSON import
//! - `cli`: The interactive command shell
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fintrack::models::{ExpenseCategory, ExpenseFields};
//! use fintrack::services::FinanceManager;
//!
//! let mut manager = FinanceManager::new();
//! manager.set_budget(ExpenseCategory::Food, 100.0)?;
//! let added = manager.add_expense(
//!     ExpenseFields::new()
//!         .amount(95.0)
//!         .category(ExpenseCategory::Food)
//!         .date(NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()),
//! )?;
//! assert!(added.budget_status.unwrap().is_near_budget);
//! # Ok::<(), fintrack::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

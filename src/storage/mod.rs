//! In-memory record storage for fintrack
//!
//! Provides the newest-first record lists, the budget book, and atomic
//! file writes for exports and settings.

pub mod budgets;
pub mod dated_list;
pub mod file_io;
pub mod records;

pub use budgets::BudgetBook;
pub use dated_list::{DateOf, DatedList, Validator};
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use records::{expense_list, income_list, ExpenseList, IncomeList};

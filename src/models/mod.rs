//! Core data models for fintrack
//!
//! This module contains the value types of the ledger: expense and income
//! records, their categories, budgets and the months used for views.

pub mod budget;
pub mod category;
pub mod period;
pub mod record;

pub use budget::{Budget, BudgetLevel, BudgetStatus, BudgetSummary, DEFAULT_NEAR_THRESHOLD};
pub use category::{Category, ExpenseCategory, IncomeCategory};
pub use period::YearMonth;
pub use record::{
    validate_amount, Expense, ExpenseFields, Income, IncomeFields, Record, RecordFields,
    AMOUNT_EPSILON,
};

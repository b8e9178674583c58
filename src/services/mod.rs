//! Service layer for fintrack
//!
//! The service layer owns the ledger state and provides the operations the
//! command layer calls: adds, atomic edits, deletes, budgets and totals.

pub mod finance;

pub use finance::{
    BudgetChange, ExpenseAdded, ExpenseModification, FinanceManager, IncomeModification,
};

//! Expense and income lists
//!
//! Wires [`DatedList`] to the record types: entries are ordered by record
//! date and must carry a finite amount above [`AMOUNT_EPSILON`].
//!
//! [`AMOUNT_EPSILON`]: crate::models::AMOUNT_EPSILON

use super::dated_list::DatedList;
use crate::models::{Expense, Income};

/// Newest-first list of expenses
pub type ExpenseList = DatedList<Expense>;

/// Newest-first list of incomes
pub type IncomeList = DatedList<Income>;

/// Create an empty expense list
pub fn expense_list() -> ExpenseList {
    DatedList::new(Expense::date, Expense::validate)
}

/// Create an empty income list
pub fn income_list() -> IncomeList {
    DatedList::new(Income::date, Income::validate)
}

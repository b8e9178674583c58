//! Budget book
//!
//! Holds at most one budget per expense category. A category without an
//! entry is untracked, which is not the same as being under budget.

use std::collections::BTreeMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, ExpenseCategory};

/// Per-category spending limits, kept in category order
#[derive(Debug, Clone, Default)]
pub struct BudgetBook {
    budgets: BTreeMap<ExpenseCategory, Budget>,
}

impl BudgetBook {
    /// Create an empty budget book
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a budget, returning the one it replaced
    pub fn upsert(&mut self, budget: Budget) -> LedgerResult<Option<Budget>> {
        budget.validate()?;
        Ok(self.budgets.insert(budget.category, budget))
    }

    /// Remove the budget for a category
    pub fn remove(&mut self, category: ExpenseCategory) -> Option<Budget> {
        self.budgets.remove(&category)
    }

    /// Get the budget for a category
    pub fn get(&self, category: ExpenseCategory) -> Option<&Budget> {
        self.budgets.get(&category)
    }

    /// Check if a category has a budget
    pub fn contains(&self, category: ExpenseCategory) -> bool {
        self.budgets.contains_key(&category)
    }

    /// All budgets in category order
    pub fn iter(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.values()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Replace every budget at once
    ///
    /// Nothing changes if any budget is invalid or a category appears twice.
    pub fn replace_all<I>(&mut self, budgets: I) -> LedgerResult<()>
    where
        I: IntoIterator<Item = Budget>,
    {
        let mut next = BTreeMap::new();
        for budget in budgets {
            budget.validate()?;
            if next.insert(budget.category, budget).is_some() {
                return Err(LedgerError::validation(format!(
                    "Duplicate budget for {}",
                    budget.category
                )));
            }
        }
        self.budgets = next;
        Ok(())
    }
}

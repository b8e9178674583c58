//! Budget model
//!
//! A budget caps spending in one expense category. After any expense change
//! in a budgeted category, the spent total is classified against the limit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::record::validate_amount;
use crate::error::{LedgerError, LedgerResult};

/// Default share of the limit at which spending counts as "near"
pub const DEFAULT_NEAR_THRESHOLD: f64 = 0.9;

/// Check that a near-limit ratio lies in (0, 1]
pub fn validate_threshold(threshold: f64) -> LedgerResult<()> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(LedgerError::validation(format!(
            "Near-budget threshold must be in (0, 1], got {}",
            threshold
        )))
    }
}

/// A spending limit for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The category this budget caps
    pub category: ExpenseCategory,

    /// Maximum total spending
    pub limit: f64,
}

impl Budget {
    /// Create a validated budget
    pub fn new(category: ExpenseCategory, limit: f64) -> LedgerResult<Self> {
        let budget = Self { category, limit };
        budget.validate()?;
        Ok(budget)
    }

    /// Validate the budget limit
    pub fn validate(&self) -> LedgerResult<()> {
        validate_amount(self.limit)
            .map_err(|_| LedgerError::validation(format!(
                "Budget limit for {} must be a positive number, got {}",
                self.category, self.limit
            )))
    }

    /// Classify `spent` against this budget
    pub fn evaluate(&self, spent: f64, threshold: f64) -> BudgetStatus {
        BudgetStatus::evaluate(self.limit, spent, threshold)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} limit {:.2}", self.category, self.limit)
    }
}

/// Where spending sits relative to a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BudgetLevel {
    Normal,
    Near,
    Over,
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "OK"),
            Self::Near => write!(f, "NEAR LIMIT"),
            Self::Over => write!(f, "OVER BUDGET"),
        }
    }
}

/// The outcome of checking spending against a budget
///
/// Computed on demand and never stored. The evaluator only produces
/// statuses where over and near are not both set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetStatus {
    pub is_over_budget: bool,
    pub is_near_budget: bool,
}

impl BudgetStatus {
    /// Classify `spent` against `limit`
    ///
    /// Over budget means strictly above the limit. Near budget means at or
    /// above `threshold * limit` without exceeding the limit.
    pub fn evaluate(limit: f64, spent: f64, threshold: f64) -> Self {
        let is_over_budget = spent > limit;
        let is_near_budget = !is_over_budget && spent >= threshold * limit;
        Self {
            is_over_budget,
            is_near_budget,
        }
    }

    pub fn level(&self) -> BudgetLevel {
        if self.is_over_budget {
            BudgetLevel::Over
        } else if self.is_near_budget {
            BudgetLevel::Near
        } else {
            BudgetLevel::Normal
        }
    }
}

/// A budget together with its live spending figures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    pub budget: Budget,
    pub spent: f64,
    pub status: BudgetStatus,
}

impl BudgetSummary {
    pub fn new(budget: Budget, spent: f64, threshold: f64) -> Self {
        Self {
            budget,
            spent,
            status: budget.evaluate(spent, threshold),
        }
    }

    /// Limit minus spending; negative once over budget
    pub fn remaining(&self) -> f64 {
        self.budget.limit - self.spent
    }

    /// Spending as a percentage of the limit
    pub fn percent_used(&self) -> f64 {
        self.spent / self.budget.limit * 100.0
    }
}

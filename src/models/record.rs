//! Expense and income records
//!
//! A record is an immutable value object: amount, category, date and an
//! optional description. Edits never touch a record in place; they build a
//! replacement from a [`RecordFields`] set and swap it in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, ExpenseCategory, IncomeCategory};
use crate::error::{LedgerError, LedgerResult};

/// Amounts at or below this are treated as zero
pub const AMOUNT_EPSILON: f64 = 1e-9;

/// Check that an amount is finite and strictly positive
pub fn validate_amount(amount: f64) -> LedgerResult<()> {
    if !amount.is_finite() {
        return Err(LedgerError::validation(format!(
            "Amount must be a finite number, got {}",
            amount
        )));
    }

    if amount <= AMOUNT_EPSILON {
        return Err(LedgerError::validation(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }

    Ok(())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// A dated amount of money in some category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<C> {
    amount: f64,
    category: C,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Money spent
pub type Expense = Record<ExpenseCategory>;

/// Money received
pub type Income = Record<IncomeCategory>;

impl<C: Category> Record<C> {
    /// Create a validated record
    pub fn new(
        amount: f64,
        category: C,
        date: NaiveDate,
        description: Option<String>,
    ) -> LedgerResult<Self> {
        let record = Self {
            amount,
            category,
            date,
            description: normalize_description(description),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> C {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Validate the record
    ///
    /// Deserialized records skip [`Record::new`], so lists re-run this before
    /// every insertion.
    pub fn validate(&self) -> LedgerResult<()> {
        validate_amount(self.amount)
    }
}

impl<C: Category> fmt::Display for Record<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:.2}", self.date, self.category, self.amount)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

/// A partial set of record fields, as parsed from user input
///
/// Used both to create a record (all required fields present) and to
/// describe an edit (unset fields keep their current value).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields<C> {
    pub amount: Option<f64>,
    pub category: Option<C>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

pub type ExpenseFields = RecordFields<ExpenseCategory>;
pub type IncomeFields = RecordFields<IncomeCategory>;

impl<C> Default for RecordFields<C> {
    fn default() -> Self {
        Self {
            amount: None,
            category: None,
            date: None,
            description: None,
        }
    }
}

impl<C: Category> RecordFields<C> {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: C) -> Self {
        self.category = Some(category);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }

    /// Build a fresh record; every field but the description is required
    pub fn into_record(self) -> LedgerResult<Record<C>> {
        let amount = self
            .amount
            .ok_or(LedgerError::InvalidElement { field: "amount" })?;
        let category = self
            .category
            .ok_or(LedgerError::InvalidElement { field: "category" })?;
        let date = self
            .date
            .ok_or(LedgerError::InvalidElement { field: "date" })?;

        Record::new(amount, category, date, self.description)
    }

    /// Build the replacement candidate for `current`
    ///
    /// The candidate is not validated here; it goes through the same list
    /// policy as any other insertion. An empty description clears it.
    pub fn merge_onto(self, current: &Record<C>) -> Record<C> {
        Record {
            amount: self.amount.unwrap_or(current.amount),
            category: self.category.unwrap_or(current.category),
            date: self.date.unwrap_or(current.date),
            description: match self.description {
                Some(description) => normalize_description(Some(description)),
                None => current.description.clone(),
            },
        }
    }
}

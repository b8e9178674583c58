//! Expense and income categories
//!
//! Categories are closed sets. Expense categories are the keys budgets are
//! tracked against; income categories only label incoming money.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::LedgerError;

/// Behaviour shared by every category enum
pub trait Category:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + FromStr<Err = LedgerError> + 'static
{
    /// Every member, in display order
    const ALL: &'static [Self];

    /// Human label used in listings and exports
    fn label(&self) -> &'static str;
}

/// Parse a category name case-insensitively against `C::ALL`
fn parse_category<C: Category>(s: &str, kind: &str) -> Result<C, LedgerError> {
    let wanted = s.trim();
    C::ALL
        .iter()
        .copied()
        .find(|c| c.label().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let known: Vec<_> = C::ALL.iter().map(|c| c.label()).collect();
            LedgerError::validation(format!(
                "Unknown {} category '{}' (expected one of: {})",
                kind,
                wanted,
                known.join(", ")
            ))
        })
}

/// Where money goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Housing,
    Health,
    Education,
    Shopping,
    Other,
}

impl Category for ExpenseCategory {
    const ALL: &'static [Self] = &[
        Self::Food,
        Self::Transport,
        Self::Entertainment,
        Self::Utilities,
        Self::Housing,
        Self::Health,
        Self::Education,
        Self::Shopping,
        Self::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Food => "FOOD",
            Self::Transport => "TRANSPORT",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Utilities => "UTILITIES",
            Self::Housing => "HOUSING",
            Self::Health => "HEALTH",
            Self::Education => "EDUCATION",
            Self::Shopping => "SHOPPING",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category(s, "expense")
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where money comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IncomeCategory {
    Salary,
    Allowance,
    Business,
    Investment,
    Gift,
    Other,
}

impl Category for IncomeCategory {
    const ALL: &'static [Self] = &[
        Self::Salary,
        Self::Allowance,
        Self::Business,
        Self::Investment,
        Self::Gift,
        Self::Other,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Salary => "SALARY",
            Self::Allowance => "ALLOWANCE",
            Self::Business => "BUSINESS",
            Self::Investment => "INVESTMENT",
            Self::Gift => "GIFT",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for IncomeCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category(s, "income")
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

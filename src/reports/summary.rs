//! Ledger summary report
//!
//! Totals for income and spending, plus a per-category spending breakdown,
//! either for one month or for the whole ledger.

use std::collections::BTreeMap;

use crate::models::{Expense, ExpenseCategory, Income, YearMonth};
use crate::services::FinanceManager;

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: ExpenseCategory,
    pub total: f64,
    pub count: usize,
    /// Share of all spending in the report, 0-100
    pub percentage: f64,
}

/// Summary of the ledger, optionally limited to one month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// `None` covers every record
    pub month: Option<YearMonth>,
    pub total_income: f64,
    pub total_expenses: f64,
    pub income_count: usize,
    pub expense_count: usize,
    /// Most spending first
    pub categories: Vec<CategorySpending>,
}

impl MonthlySummary {
    /// Generate a summary for `month`, or for everything when `None`
    pub fn generate(manager: &FinanceManager, month: Option<YearMonth>) -> Self {
        let (expenses, incomes): (Vec<&Expense>, Vec<&Income>) = match month {
            Some(m) => (manager.expenses_in_month(m), manager.incomes_in_month(m)),
            None => (
                manager.expenses().iter().collect(),
                manager.incomes().iter().collect(),
            ),
        };

        let total_expenses: f64 = expenses.iter().map(|e| e.amount()).sum();
        let total_income: f64 = incomes.iter().map(|i| i.amount()).sum();

        let mut by_category: BTreeMap<ExpenseCategory, (f64, usize)> = BTreeMap::new();
        for expense in &expenses {
            let entry = by_category.entry(expense.category()).or_insert((0.0, 0));
            entry.0 += expense.amount();
            entry.1 += 1;
        }

        let mut categories: Vec<CategorySpending> = by_category
            .into_iter()
            .map(|(category, (total, count))| CategorySpending {
                category,
                total,
                count,
                percentage: if total_expenses > 0.0 {
                    total / total_expenses * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        // Stable, so equal totals stay in category order
        categories.sort_by(|a, b| b.total.total_cmp(&a.total));

        Self {
            month,
            total_income,
            total_expenses,
            income_count: incomes.len(),
            expense_count: expenses.len(),
            categories,
        }
    }

    /// Income minus spending
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        let scope = match self.month {
            Some(m) => m.to_string(),
            None => "all time".to_string(),
        };
        output.push_str(&format!("Summary: {}\n", scope));
        output.push_str(&"=".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14} ({} entries)\n",
            "Total income:",
            money(symbol, self.total_income),
            self.income_count
        ));
        output.push_str(&format!(
            "{:<20} {:>14} ({} entries)\n",
            "Total expenses:",
            money(symbol, self.total_expenses),
            self.expense_count
        ));
        output.push_str(&format!("{:<20} {:>14}\n", "Net:", money(symbol, self.net())));

        if !self.categories.is_empty() {
            output.push('\n');
            output.push_str(&format!(
                "{:<16} {:>14} {:>6} {:>7}\n",
                "Category", "Spent", "Count", "%"
            ));
            output.push_str(&"-".repeat(48));
            output.push('\n');
            for c in &self.categories {
                output.push_str(&format!(
                    "{:<16} {:>14} {:>6} {:>6.1}%\n",
                    c.category.to_string(),
                    money(symbol, c.total),
                    c.count,
                    c.percentage
                ));
            }
        }

        output
    }
}

fn money(symbol: &str, amount: f64) -> String {
    crate::display::format_money(symbol, amount)
}

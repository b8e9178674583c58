//! Budget display formatting

use super::format_money;
use crate::models::{BudgetLevel, BudgetStatus, BudgetSummary, ExpenseCategory};

/// A one-line warning for a status, or `None` when spending is normal
pub fn format_budget_status(category: ExpenseCategory, status: &BudgetStatus) -> Option<String> {
    match status.level() {
        BudgetLevel::Over => Some(format!("Warning: you are over budget for {}!", category)),
        BudgetLevel::Near => Some(format!("Heads up: you are close to your {} budget.", category)),
        BudgetLevel::Normal => None,
    }
}

/// Format one budget with its spending
pub fn format_budget_summary(summary: &BudgetSummary, symbol: &str) -> String {
    format!(
        "{:<14} {:>12} {:>12} {:>12} {:>6.1}%  {}",
        summary.budget.category.to_string(),
        format_money(symbol, summary.budget.limit),
        format_money(symbol, summary.spent),
        format_money(symbol, summary.remaining()),
        summary.percent_used(),
        summary.status.level()
    )
}

/// Format every budget as a table
pub fn format_budget_overview(summaries: &[BudgetSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<14} {:>12} {:>12} {:>12} {:>7}  {}\n",
        "Category", "Limit", "Spent", "Remaining", "Used", "Status"
    ));
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for summary in summaries {
        output.push_str(&format_budget_summary(summary, symbol));
        output.push('\n');
    }

    output
}

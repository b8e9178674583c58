//! CSV Export functionality
//!
//! Exports records and budgets to CSV format.

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{Category, Record};
use crate::services::FinanceManager;

/// Export every record, expenses then incomes, to CSV
pub fn export_records_csv<W: Write>(
    manager: &FinanceManager,
    writer: &mut W,
    date_format: &str,
) -> LedgerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["Type", "Date", "Category", "Amount", "Description"])?;

    write_records(&mut csv, "Expense", manager.expenses(), date_format)?;
    write_records(&mut csv, "Income", manager.incomes(), date_format)?;

    csv.flush()?;
    Ok(())
}

fn write_records<W: Write, C: Category>(
    csv: &mut ::csv::Writer<W>,
    kind: &str,
    records: &[Record<C>],
    date_format: &str,
) -> LedgerResult<()> {
    for record in records {
        csv.write_record([
            kind.to_string(),
            record.date().format(date_format).to_string(),
            record.category().to_string(),
            format!("{:.2}", record.amount()),
            record.description().unwrap_or("").to_string(),
        ])?;
    }
    Ok(())
}

/// Export every budget with its current spending to CSV
pub fn export_budgets_csv<W: Write>(manager: &FinanceManager, writer: &mut W) -> LedgerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["Category", "Limit", "Spent", "Remaining", "Status"])?;

    for summary in manager.budget_overview() {
        csv.write_record([
            summary.budget.category.to_string(),
            format!("{:.2}", summary.budget.limit),
            format!("{:.2}", summary.spent),
            format!("{:.2}", summary.remaining()),
            summary.status.level().to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseFields, IncomeCategory, IncomeFields};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> FinanceManager {
        let mut manager = FinanceManager::new();
        manager
            .add_expense(
                ExpenseFields::new()
                    .amount(12.5)
                    .category(ExpenseCategory::Food)
                    .date(date("2025-10-05"))
                    .description("lunch, with friends"),
            )
            .unwrap();
        manager
            .add_expense(
                ExpenseFields::new()
                    .amount(40.0)
                    .category(ExpenseCategory::Transport)
                    .date(date("2025-10-07")),
            )
            .unwrap();
        manager
            .add_income(
                IncomeFields::new()
                    .amount(2000.0)
                    .category(IncomeCategory::Salary)
                    .date(date("2025-09-30")),
            )
            .unwrap();
        manager
    }

    #[test]
    fn test_export_records_csv() {
        let mut buffer = Vec::new();
        export_records_csv(&sample(), &mut buffer, "%Y-%m-%d").unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Type,Date,Category,Amount,Description");
        assert_eq!(lines[1], "Expense,2025-10-07,TRANSPORT,40.00,");
        assert_eq!(lines[2], "Expense,2025-10-05,FOOD,12.50,\"lunch, with friends\"");
        assert_eq!(lines[3], "Income,2025-09-30,SALARY,2000.00,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_empty_ledger() {
        let mut buffer = Vec::new();
        export_records_csv(&FinanceManager::new(), &mut buffer, "%Y-%m-%d").unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Type,Date,Category,Amount,Description\n"
        );
    }

    #[test]
    fn test_export_budgets_csv() {
        let mut manager = sample();
        manager.set_budget(ExpenseCategory::Transport, 30.0).unwrap();
        manager.set_budget(ExpenseCategory::Food, 100.0).unwrap();

        let mut buffer = Vec::new();
        export_budgets_csv(&manager, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Category,Limit,Spent,Remaining,Status");
        assert_eq!(lines[1], "FOOD,100.00,12.50,87.50,OK");
        assert_eq!(lines[2], "TRANSPORT,30.00,40.00,-10.00,OVER BUDGET");
    }
}

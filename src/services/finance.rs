//! Finance manager
//!
//! Owns the expense and income lists and the budget book, and is the only
//! way the command layer changes them. Every operation returns plain data
//! (the records involved and, for expenses, the budget status) and leaves
//! formatting and logging to the caller.

use crate::error::{LedgerError, LedgerResult};
use crate::models::budget::validate_threshold;
use crate::models::{
    Budget, BudgetStatus, BudgetSummary, Category, Expense, ExpenseCategory, ExpenseFields,
    Income, IncomeFields, Record, RecordFields, YearMonth, DEFAULT_NEAR_THRESHOLD,
};
use crate::storage::{expense_list, income_list, BudgetBook, DatedList, ExpenseList, IncomeList};

/// Result of adding an expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseAdded {
    pub expense: Expense,
    /// Present when the expense's category has a budget
    pub budget_status: Option<BudgetStatus>,
}

/// Result of modifying an expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseModification {
    pub old: Expense,
    pub new: Expense,
    /// Present when the new category has a budget
    pub budget_status: Option<BudgetStatus>,
}

/// Result of modifying an income
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeModification {
    pub old: Income,
    pub new: Income,
}

/// Result of setting a budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetChange {
    pub budget: Budget,
    pub previous: Option<Budget>,
    /// Status of current spending against the new limit
    pub status: BudgetStatus,
}

/// Orchestrates all ledger state
#[derive(Debug, Clone)]
pub struct FinanceManager {
    expenses: ExpenseList,
    incomes: IncomeList,
    budgets: BudgetBook,
    near_threshold: f64,
}

impl Default for FinanceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a 1-based position into an index
fn resolve_position(position: usize, len: usize) -> LedgerResult<usize> {
    if position == 0 || position > len {
        return Err(LedgerError::IndexOutOfRange { position, len });
    }
    Ok(position - 1)
}

/// Build every record of a batch, or fail on the first bad one
fn build_batch<C: Category>(batch: Vec<RecordFields<C>>) -> LedgerResult<Vec<Record<C>>> {
    batch
        .into_iter()
        .enumerate()
        .map(|(i, fields)| fields.into_record().map_err(|e| LedgerError::in_batch(i + 1, e)))
        .collect()
}

/// Replace the record at `position` with `fields` merged onto it
///
/// Resolving the position and building the candidate never touch the list;
/// the list's own `replace` validates before swapping.
fn modify_record<C: Category>(
    list: &mut DatedList<Record<C>>,
    position: usize,
    fields: RecordFields<C>,
) -> LedgerResult<(Record<C>, Record<C>)> {
    let index = resolve_position(position, list.len())?;
    let candidate = fields.merge_onto(&list.view()[index]);
    let new = candidate.clone();
    let old = list.replace(index, candidate)?;
    Ok((old, new))
}

impl FinanceManager {
    /// Create an empty ledger with the default near-budget threshold
    pub fn new() -> Self {
        Self {
            expenses: expense_list(),
            incomes: income_list(),
            budgets: BudgetBook::new(),
            near_threshold: DEFAULT_NEAR_THRESHOLD,
        }
    }

    /// Create an empty ledger with a custom near-budget threshold
    pub fn with_threshold(near_threshold: f64) -> LedgerResult<Self> {
        validate_threshold(near_threshold)?;
        Ok(Self {
            near_threshold,
            ..Self::new()
        })
    }

    pub fn near_threshold(&self) -> f64 {
        self.near_threshold
    }

    /// Read-only, newest-first expenses
    pub fn expenses(&self) -> &[Expense] {
        self.expenses.view()
    }

    /// Read-only, newest-first incomes
    pub fn incomes(&self) -> &[Income] {
        self.incomes.view()
    }

    /// All budgets in category order
    pub fn budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.iter()
    }

    // ----- Expenses -----

    /// Add one expense
    pub fn add_expense(&mut self, fields: ExpenseFields) -> LedgerResult<ExpenseAdded> {
        let expense = fields.into_record()?;
        self.expenses.add(expense.clone())?;

        let budget_status = self.budget_status(expense.category());
        Ok(ExpenseAdded {
            expense,
            budget_status,
        })
    }

    /// Add a batch of expenses; nothing is added if any entry is invalid
    pub fn add_expenses(&mut self, batch: Vec<ExpenseFields>) -> LedgerResult<usize> {
        let records = build_batch(batch)?;
        let count = records.len();
        self.expenses.add_all(records)?;
        Ok(count)
    }

    /// Replace the expense at a 1-based position with an edited copy
    pub fn modify_expense(
        &mut self,
        position: usize,
        fields: ExpenseFields,
    ) -> LedgerResult<ExpenseModification> {
        let (old, new) = modify_record(&mut self.expenses, position, fields)?;
        let budget_status = self.budget_status(new.category());
        Ok(ExpenseModification {
            old,
            new,
            budget_status,
        })
    }

    /// Remove the expense at a 1-based position
    pub fn delete_expense(&mut self, position: usize) -> LedgerResult<Expense> {
        let index = resolve_position(position, self.expenses.len())?;
        self.expenses.remove(index)
    }

    // ----- Incomes -----

    /// Add one income
    pub fn add_income(&mut self, fields: IncomeFields) -> LedgerResult<Income> {
        let income = fields.into_record()?;
        self.incomes.add(income.clone())?;
        Ok(income)
    }

    /// Add a batch of incomes; nothing is added if any entry is invalid
    pub fn add_incomes(&mut self, batch: Vec<IncomeFields>) -> LedgerResult<usize> {
        let records = build_batch(batch)?;
        let count = records.len();
        self.incomes.add_all(records)?;
        Ok(count)
    }

    /// Replace the income at a 1-based position with an edited copy
    pub fn modify_income(
        &mut self,
        position: usize,
        fields: IncomeFields,
    ) -> LedgerResult<IncomeModification> {
        let (old, new) = modify_record(&mut self.incomes, position, fields)?;
        Ok(IncomeModification { old, new })
    }

    /// Remove the income at a 1-based position
    pub fn delete_income(&mut self, position: usize) -> LedgerResult<Income> {
        let index = resolve_position(position, self.incomes.len())?;
        self.incomes.remove(index)
    }

    // ----- Budgets -----

    /// Create or update the budget for a category
    pub fn set_budget(&mut self, category: ExpenseCategory, limit: f64) -> LedgerResult<BudgetChange> {
        let budget = Budget::new(category, limit)?;
        let previous = self.budgets.upsert(budget)?;
        let status = budget.evaluate(self.spent_in_category(category), self.near_threshold);

        Ok(BudgetChange {
            budget,
            previous,
            status,
        })
    }

    /// Remove the budget for a category, returning it if there was one
    pub fn delete_budget(&mut self, category: ExpenseCategory) -> Option<Budget> {
        self.budgets.remove(category)
    }

    /// Get the budget for a category
    pub fn budget(&self, category: ExpenseCategory) -> Option<&Budget> {
        self.budgets.get(category)
    }

    /// Classify current spending; `None` when the category has no budget
    pub fn budget_status(&self, category: ExpenseCategory) -> Option<BudgetStatus> {
        self.budget_summary(category).map(|s| s.status)
    }

    /// Limit, spending and status for one budgeted category
    pub fn budget_summary(&self, category: ExpenseCategory) -> Option<BudgetSummary> {
        let budget = *self.budgets.get(category)?;
        Some(BudgetSummary::new(
            budget,
            self.spent_in_category(category),
            self.near_threshold,
        ))
    }

    /// Summaries for every budgeted category, in category order
    pub fn budget_overview(&self) -> Vec<BudgetSummary> {
        self.budgets
            .iter()
            .map(|budget| {
                BudgetSummary::new(
                    *budget,
                    self.spent_in_category(budget.category),
                    self.near_threshold,
                )
            })
            .collect()
    }

    // ----- Aggregates -----

    /// Sum of all expenses in a category
    pub fn spent_in_category(&self, category: ExpenseCategory) -> f64 {
        self.expenses
            .iter()
            .filter(|e| e.category() == category)
            .map(|e| e.amount())
            .sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    pub fn total_income(&self) -> f64 {
        self.incomes.iter().map(|i| i.amount()).sum()
    }

    /// Income minus expenses
    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    /// Expenses dated in `month`, newest first
    pub fn expenses_in_month(&self, month: YearMonth) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| month.contains(e.date()))
            .collect()
    }

    /// Incomes dated in `month`, newest first
    pub fn incomes_in_month(&self, month: YearMonth) -> Vec<&Income> {
        self.incomes
            .iter()
            .filter(|i| month.contains(i.date()))
            .collect()
    }

    /// Replace the whole ledger
    ///
    /// Everything is validated before anything is replaced: a missing or
    /// invalid entry anywhere leaves the current state as it was.
    pub fn restore(
        &mut self,
        expenses: Vec<Option<Expense>>,
        incomes: Vec<Option<Income>>,
        budgets: Vec<Budget>,
    ) -> LedgerResult<()> {
        let mut next_expenses = expense_list();
        next_expenses.add_all_present(expenses)?;

        let mut next_incomes = income_list();
        next_incomes.add_all_present(incomes)?;

        let mut next_budgets = BudgetBook::new();
        next_budgets.replace_all(budgets)?;

        self.expenses = next_expenses;
        self.incomes = next_incomes;
        self.budgets = next_budgets;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLevel, IncomeCategory};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn expense(amount: f64, category: ExpenseCategory, d: &str) -> ExpenseFields {
        ExpenseFields::new()
            .amount(amount)
            .category(category)
            .date(date(d))
    }

    fn income(amount: f64, d: &str) -> IncomeFields {
        IncomeFields::new()
            .amount(amount)
            .category(IncomeCategory::Salary)
            .date(date(d))
    }

    fn three_expenses() -> FinanceManager {
        let mut manager = FinanceManager::new();
        manager
            .add_expense(expense(10.0, ExpenseCategory::Food, "2025-10-05").description("lunch"))
            .unwrap();
        manager
            .add_expense(expense(20.0, ExpenseCategory::Transport, "2025-10-08"))
            .unwrap();
        manager
            .add_expense(expense(15.0, ExpenseCategory::Food, "2025-10-06").description("dinner"))
            .unwrap();
        manager
    }

    #[test]
    fn test_view_is_newest_first() {
        let manager = three_expenses();
        let dates: Vec<_> = manager.expenses().iter().map(|e| e.date()).collect();
        assert_eq!(
            dates,
            vec![date("2025-10-08"), date("2025-10-06"), date("2025-10-05")]
        );
    }

    #[test]
    fn test_modify_only_amount() {
        let mut manager = three_expenses();

        let result = manager
            .modify_expense(2, ExpenseFields::new().amount(25.0))
            .unwrap();

        assert_eq!(result.old.amount(), 15.0);
        assert_eq!(result.new.amount(), 25.0);
        assert_eq!(result.new.category(), ExpenseCategory::Food);
        assert_eq!(result.new.date(), date("2025-10-06"));
        assert_eq!(result.new.description(), Some("dinner"));

        // Date unchanged, so the record stays at position 2
        assert_eq!(manager.expenses()[1], result.new);
        assert_eq!(manager.expenses().len(), 3);
    }

    #[test]
    fn test_modify_date_moves_record() {
        let mut manager = three_expenses();

        manager
            .modify_expense(3, ExpenseFields::new().date(date("2025-10-09")))
            .unwrap();

        let first = &manager.expenses()[0];
        assert_eq!(first.date(), date("2025-10-09"));
        assert_eq!(first.description(), Some("lunch"));
    }

    #[test]
    fn test_invalid_modify_leaves_record_in_place() {
        let mut manager = three_expenses();
        let before = manager.expenses().to_vec();

        let err = manager
            .modify_expense(2, ExpenseFields::new().amount(-4.0).date(date("2020-01-01")))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(manager.expenses(), before.as_slice());
    }

    #[test]
    fn test_modify_out_of_range() {
        let mut manager = three_expenses();

        for position in [0, 4, 100] {
            let err = manager
                .modify_expense(position, ExpenseFields::new().amount(1.0))
                .unwrap_err();
            assert!(err.is_out_of_range());
        }
        assert_eq!(manager.expenses().len(), 3);
    }

    #[test]
    fn test_add_tiny_amount_fails() {
        let mut manager = FinanceManager::new();
        let err = manager
            .add_expense(expense(1e-10, ExpenseCategory::Food, "2025-10-05"))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(manager.expenses().is_empty());
    }

    #[test]
    fn test_batch_with_missing_entry_changes_nothing() {
        let mut manager = FinanceManager::new();
        let err = manager
            .add_expenses(vec![
                expense(10.0, ExpenseCategory::Food, "2025-10-05"),
                ExpenseFields::new(),
                expense(20.0, ExpenseCategory::Food, "2025-10-08"),
            ])
            .unwrap_err();

        assert!(err.is_invalid_element());
        assert_eq!(err.batch_position(), Some(2));
        assert_eq!(manager.expenses().len(), 0);

        let added = manager
            .add_expenses(vec![
                expense(10.0, ExpenseCategory::Food, "2025-10-05"),
                expense(20.0, ExpenseCategory::Food, "2025-10-08"),
            ])
            .unwrap();
        assert_eq!(added, 2);
    }

    #[test]
    fn test_budget_status_on_add() {
        let mut manager = FinanceManager::new();
        manager.set_budget(ExpenseCategory::Food, 100.0).unwrap();

        let added = manager
            .add_expense(expense(95.0, ExpenseCategory::Food, "2025-10-01"))
            .unwrap();
        let status = added.budget_status.unwrap();
        assert!(status.is_near_budget);
        assert!(!status.is_over_budget);

        let added = manager
            .add_expense(expense(6.0, ExpenseCategory::Food, "2025-10-02"))
            .unwrap();
        let status = added.budget_status.unwrap();
        assert!(status.is_over_budget);
        assert!(!status.is_near_budget);
    }

    #[test]
    fn test_no_budget_means_no_status() {
        let mut manager = FinanceManager::new();
        let added = manager
            .add_expense(expense(500.0, ExpenseCategory::Shopping, "2025-10-01"))
            .unwrap();

        assert!(added.budget_status.is_none());
        assert!(manager.budget_status(ExpenseCategory::Shopping).is_none());
    }

    #[test]
    fn test_modify_reevaluates_new_category() {
        let mut manager = three_expenses();
        manager.set_budget(ExpenseCategory::Transport, 30.0).unwrap();

        // Move the 15.00 Food dinner into Transport: 20 + 15 = 35 > 30
        let result = manager
            .modify_expense(2, ExpenseFields::new().category(ExpenseCategory::Transport))
            .unwrap();

        assert_eq!(result.budget_status.unwrap().level(), BudgetLevel::Over);
        assert_eq!(manager.spent_in_category(ExpenseCategory::Food), 10.0);
    }

    #[test]
    fn test_set_budget_reports_current_status() {
        let mut manager = three_expenses();

        let change = manager.set_budget(ExpenseCategory::Food, 26.0).unwrap();
        assert!(change.previous.is_none());
        assert_eq!(change.status.level(), BudgetLevel::Near);

        let change = manager.set_budget(ExpenseCategory::Food, 20.0).unwrap();
        assert_eq!(change.previous.map(|b| b.limit), Some(26.0));
        assert_eq!(change.status.level(), BudgetLevel::Over);

        assert!(manager.set_budget(ExpenseCategory::Food, 0.0).is_err());
        assert_eq!(manager.budget(ExpenseCategory::Food).unwrap().limit, 20.0);
    }

    #[test]
    fn test_delete_budget() {
        let mut manager = FinanceManager::new();
        manager.set_budget(ExpenseCategory::Food, 50.0).unwrap();

        assert!(manager.delete_budget(ExpenseCategory::Food).is_some());
        assert!(manager.delete_budget(ExpenseCategory::Food).is_none());
        assert!(manager.budget_overview().is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let mut manager = FinanceManager::with_threshold(0.5).unwrap();
        manager.set_budget(ExpenseCategory::Food, 100.0).unwrap();
        manager
            .add_expense(expense(60.0, ExpenseCategory::Food, "2025-10-01"))
            .unwrap();

        assert_eq!(
            manager.budget_status(ExpenseCategory::Food).unwrap().level(),
            BudgetLevel::Near
        );
        assert!(FinanceManager::with_threshold(0.0).is_err());
    }

    #[test]
    fn test_delete_records() {
        let mut manager = three_expenses();

        let removed = manager.delete_expense(1).unwrap();
        assert_eq!(removed.date(), date("2025-10-08"));
        assert_eq!(manager.expenses().len(), 2);

        assert!(manager.delete_expense(3).unwrap_err().is_out_of_range());
        assert!(manager.delete_income(1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_incomes() {
        let mut manager = FinanceManager::new();
        manager.add_income(income(3000.0, "2025-09-30")).unwrap();
        manager.add_income(income(200.0, "2025-10-15")).unwrap();

        assert_eq!(manager.incomes()[0].amount(), 200.0);

        let result = manager
            .modify_income(2, IncomeFields::new().category(IncomeCategory::Business))
            .unwrap();
        assert_eq!(result.old.category(), IncomeCategory::Salary);
        assert_eq!(result.new.category(), IncomeCategory::Business);

        assert!(manager
            .modify_income(1, IncomeFields::new().amount(f64::NAN))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_totals_and_months() {
        let mut manager = three_expenses();
        manager.add_income(income(100.0, "2025-10-01")).unwrap();
        manager.add_income(income(50.0, "2025-09-01")).unwrap();
        manager
            .add_expense(expense(5.0, ExpenseCategory::Food, "2025-09-20"))
            .unwrap();

        assert_eq!(manager.total_expenses(), 50.0);
        assert_eq!(manager.total_income(), 150.0);
        assert_eq!(manager.balance(), 100.0);

        let october: YearMonth = "2025-10".parse().unwrap();
        assert_eq!(manager.expenses_in_month(october).len(), 3);
        assert_eq!(manager.incomes_in_month(october).len(), 1);
    }

    #[test]
    fn test_restore_is_all_or_nothing() {
        let mut manager = three_expenses();
        let before = manager.expenses().to_vec();

        let replacement = Expense::new(1.0, ExpenseCategory::Other, date("2024-01-01"), None).unwrap();
        let err = manager
            .restore(vec![Some(replacement.clone()), None], Vec::new(), Vec::new())
            .unwrap_err();
        assert!(err.is_invalid_element());
        assert_eq!(manager.expenses(), before.as_slice());

        let budget = Budget::new(ExpenseCategory::Other, 10.0).unwrap();
        manager
            .restore(vec![Some(replacement)], Vec::new(), vec![budget])
            .unwrap();
        assert_eq!(manager.expenses().len(), 1);
        assert_eq!(manager.budget_overview().len(), 1);
    }
}

//! JSON export and import
//!
//! Exports the whole ledger with schema versioning, and reads such a file
//! back into a ledger in one all-or-nothing step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Expense, Income};
use crate::services::FinanceManager;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All expenses, newest first
    pub expenses: Vec<Expense>,

    /// All incomes, newest first
    pub incomes: Vec<Income>,

    /// All budgets in category order
    pub budgets: Vec<Budget>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub income_count: usize,
    pub total_expenses: f64,
    pub total_income: f64,
    pub balance: f64,
    /// Earliest record date, if any
    pub earliest_record: Option<String>,
    /// Latest record date, if any
    pub latest_record: Option<String>,
}

impl LedgerExport {
    /// Snapshot the ledger
    pub fn from_manager(manager: &FinanceManager) -> Self {
        let expenses = manager.expenses().to_vec();
        let incomes = manager.incomes().to_vec();

        let dates = || {
            expenses
                .iter()
                .map(|e| e.date())
                .chain(incomes.iter().map(|i| i.date()))
        };
        let earliest_record = dates().min().map(|d| d.to_string());
        let latest_record = dates().max().map(|d| d.to_string());

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            income_count: incomes.len(),
            total_expenses: manager.total_expenses(),
            total_income: manager.total_income(),
            balance: manager.balance(),
            earliest_record,
            latest_record,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            incomes,
            budgets: manager.budgets().copied().collect(),
            metadata,
        }
    }
}

/// A ledger file as read back in
///
/// Entries are optional so that a `null` in the file is reported as a
/// missing entry instead of a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerImport {
    pub schema_version: String,
    #[serde(default)]
    pub expenses: Vec<Option<Expense>>,
    #[serde(default)]
    pub incomes: Vec<Option<Income>>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl LedgerImport {
    /// Check the file was written by a compatible version
    pub fn validate(&self) -> LedgerResult<()> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.schema_version) != major(EXPORT_SCHEMA_VERSION) {
            return Err(LedgerError::validation(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }
        Ok(())
    }

    /// Replace the ledger's contents with this import
    ///
    /// Returns the number of (expenses, incomes, budgets) loaded.
    pub fn apply(self, manager: &mut FinanceManager) -> LedgerResult<(usize, usize, usize)> {
        self.validate()?;
        let counts = (self.expenses.len(), self.incomes.len(), self.budgets.len());
        manager.restore(self.expenses, self.incomes, self.budgets)?;
        Ok(counts)
    }
}

/// Export the full ledger to JSON
pub fn export_json<W: Write>(manager: &FinanceManager, writer: &mut W, pretty: bool) -> LedgerResult<()> {
    let export = LedgerExport::from_manager(manager);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a ledger export
pub fn import_json<R: Read>(reader: R) -> LedgerResult<LedgerImport> {
    let import: LedgerImport = serde_json::from_reader(reader)
        .map_err(|e| LedgerError::Json(format!("Failed to parse ledger file: {}", e)))?;
    import.validate()?;
    Ok(import)
}

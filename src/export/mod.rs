//! Export module for fintrack
//!
//! Provides data export in two formats:
//! - CSV: records and budgets (spreadsheet-compatible)
//! - JSON: a full ledger snapshot that can be imported again

pub mod csv;
pub mod json;

pub use self::csv::{export_budgets_csv, export_records_csv};
pub use self::json::{
    export_json, import_json, ExportMetadata, LedgerExport, LedgerImport, EXPORT_SCHEMA_VERSION,
};

//! Display formatting for terminal output
//!
//! Turns ledger data into text. Nothing in here touches ledger state.

pub mod budget;
pub mod record;

pub use budget::{format_budget_overview, format_budget_status, format_budget_summary};
pub use record::{format_record_details, format_record_list};

/// Format an amount with a currency symbol and two decimals
pub fn format_money(symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, -amount)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

/// Truncate a string to a maximum display length
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

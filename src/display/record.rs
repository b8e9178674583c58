//! Record display formatting
//!
//! Listings show the 1-based position a record has in the full newest-first
//! list, which is the position edit and delete commands take.

use super::{format_money, truncate};
use crate::models::{Category, Record};

/// Format a numbered listing of records
pub fn format_record_list<'a, C, I>(entries: I, symbol: &str, date_format: &str) -> String
where
    C: Category,
    I: IntoIterator<Item = (usize, &'a Record<C>)>,
{
    let mut rows = String::new();
    let mut count = 0;
    for (position, record) in entries {
        count += 1;
        rows.push_str(&format!(
            "{:>4}  {:<12} {:<14} {:>12}  {}\n",
            position,
            record.date().format(date_format).to_string(),
            record.category().to_string(),
            format_money(symbol, record.amount()),
            truncate(record.description().unwrap_or(""), 30)
        ));
    }

    if count == 0 {
        return "No entries found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<12} {:<14} {:>12}  {}\n",
        "#", "Date", "Category", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');
    output.push_str(&rows);
    output
}

/// Format one record on a single line
pub fn format_record_details<C: Category>(record: &Record<C>, symbol: &str, date_format: &str) -> String {
    let mut output = format!(
        "{} | {} | {}",
        record.date().format(date_format),
        record.category(),
        format_money(symbol, record.amount())
    );
    if let Some(description) = record.description() {
        output.push_str(&format!(" | {}", description));
    }
    output
}

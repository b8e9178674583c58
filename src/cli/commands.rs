//! Shell commands
//!
//! Each input line is parsed into a [`ShellCommand`] and executed against a
//! [`Session`]. Handlers return their output as a [`CommandOutcome`] and
//! leave printing to the shell loop.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use crate::config::{FintrackPaths, Settings};
use crate::display::budget::{format_budget_overview, format_budget_status, format_budget_summary};
use crate::display::format_money;
use crate::display::record::{format_record_details, format_record_list};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_budgets_csv, export_json, export_records_csv, import_json};
use crate::models::{
    BudgetStatus, Category, ExpenseCategory, ExpenseFields, IncomeFields, Record, RecordFields,
    YearMonth,
};
use crate::reports::MonthlySummary;
use crate::services::FinanceManager;
use crate::storage::write_atomic;

/// One line of shell input
#[derive(Parser, Debug)]
#[command(multicall = true, name = "fintrack")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands available in the shell
#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Record an expense
    AddExpense(AddArgs),

    /// Record an income
    AddIncome(AddArgs),

    /// List records, newest first
    List {
        /// Which records to show
        #[arg(value_enum, default_value_t = ListKind::All)]
        kind: ListKind,
        /// Only show records from this month (YYYY-MM)
        #[arg(long)]
        month: Option<YearMonth>,
    },

    /// Edit an expense by its list position
    ModifyExpense(ModifyArgs),

    /// Edit an income by its list position
    ModifyIncome(ModifyArgs),

    /// Delete an expense by its list position
    DeleteExpense(DeleteArgs),

    /// Delete an income by its list position
    DeleteIncome(DeleteArgs),

    /// Set the spending limit for a category
    SetBudget {
        category: String,
        #[arg(allow_negative_numbers = true)]
        limit: f64,
    },

    /// Remove the spending limit for a category
    DeleteBudget { category: String },

    /// Show budget status for one category, or all budgets
    Budget { category: Option<String> },

    /// Show totals and spending by category
    Summary {
        /// Limit the summary to this month (YYYY-MM)
        #[arg(long)]
        month: Option<YearMonth>,
    },

    /// Write records or budgets to a file
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Relative paths land in the export directory
        path: PathBuf,
    },

    /// Replace the ledger with a JSON export
    Import { path: PathBuf },

    /// Leave the shell
    #[command(alias = "bye")]
    Exit,
}

/// Arguments for adding a record
#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,
    #[arg(short, long)]
    pub category: String,
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
    #[arg(short = 'm', long)]
    pub description: Option<String>,
}

/// Arguments for editing a record; unset fields keep their value
#[derive(Args, Debug)]
pub struct ModifyArgs {
    /// 1-based position in the full list
    pub position: usize,
    #[arg(short, long, allow_negative_numbers = true)]
    pub amount: Option<f64>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
    /// New description; an empty string clears it
    #[arg(short = 'm', long)]
    pub description: Option<String>,
    /// Not accepted: positions refer to the full list
    #[arg(long, hide = true)]
    pub month: Option<YearMonth>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// 1-based position in the full list
    pub position: usize,
    /// Not accepted: positions refer to the full list
    #[arg(long, hide = true)]
    pub month: Option<YearMonth>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Expenses,
    Incomes,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Expenses and incomes as CSV
    Csv,
    /// Budgets with spending as CSV
    Budgets,
    /// Full ledger as JSON
    Json,
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Print the text and read the next line
    Continue(String),
    /// Print the text and stop
    Exit(String),
}

/// State shared by every command in one shell session
#[derive(Debug)]
pub struct Session {
    pub manager: FinanceManager,
    pub settings: Settings,
    pub paths: FintrackPaths,
}

impl Session {
    pub fn new(manager: FinanceManager, settings: Settings, paths: FintrackPaths) -> Self {
        Self {
            manager,
            settings,
            paths,
        }
    }

    fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    fn date_format(&self) -> &str {
        &self.settings.date_format
    }

    /// Absolute paths are kept; relative ones land in the export directory
    fn export_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.settings.export_dir(&self.paths).join(path)
        }
    }

    /// A path as typed if it exists, else the same name in the export directory
    fn import_path(&self, path: &Path) -> PathBuf {
        if path.exists() {
            path.to_path_buf()
        } else {
            self.export_path(path)
        }
    }
}

/// Parse a tokenized line
///
/// Help requests (`help`, `<command> --help`) and parse errors both come
/// back as [`CommandOutcome`] text for the shell to print.
pub fn parse_tokens(tokens: &[String]) -> Result<ShellCommand, CommandOutcome> {
    match ShellLine::try_parse_from(tokens) {
        Ok(line) => Ok(line.command),
        Err(err) => {
            use clap::error::ErrorKind;
            let rendered = err.render().to_string();
            match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::DisplayVersion => Err(CommandOutcome::Continue(rendered)),
                _ => Err(CommandOutcome::Continue(format!(
                    "Error: {}",
                    rendered.trim_start_matches("error: ").trim_end()
                ))),
            }
        }
    }
}

/// Run one command against the session
pub fn execute(session: &mut Session, command: ShellCommand) -> LedgerResult<CommandOutcome> {
    let text = match command {
        ShellCommand::AddExpense(args) => add_expense(session, args)?,
        ShellCommand::AddIncome(args) => add_income(session, args)?,
        ShellCommand::List { kind, month } => list(session, kind, month),
        ShellCommand::ModifyExpense(args) => modify_expense(session, args)?,
        ShellCommand::ModifyIncome(args) => modify_income(session, args)?,
        ShellCommand::DeleteExpense(args) => {
            reject_month(&args.month)?;
            let expense = session.manager.delete_expense(args.position)?;
            info!(position = args.position, "Deleted expense");
            format!(
                "Deleted expense: {}",
                format_record_details(&expense, session.symbol(), session.date_format())
            )
        }
        ShellCommand::DeleteIncome(args) => {
            reject_month(&args.month)?;
            let income = session.manager.delete_income(args.position)?;
            info!(position = args.position, "Deleted income");
            format!(
                "Deleted income: {}",
                format_record_details(&income, session.symbol(), session.date_format())
            )
        }
        ShellCommand::SetBudget { category, limit } => {
            set_budget(session, category.parse()?, limit)?
        }
        ShellCommand::DeleteBudget { category } => {
            let category: ExpenseCategory = category.parse()?;
            match session.manager.delete_budget(category) {
                Some(_) => {
                    info!(%category, "Deleted budget");
                    format!("Removed budget for {}.", category)
                }
                None => {
                    return Err(LedgerError::Command(format!("No budget set for {}", category)))
                }
            }
        }
        ShellCommand::Budget { category } => {
            let category = category.map(|c| c.parse()).transpose()?;
            budget(session, category)?
        }
        ShellCommand::Summary { month } => {
            MonthlySummary::generate(&session.manager, month).format_terminal(session.symbol())
        }
        ShellCommand::Export { format, path } => export(session, format, &path)?,
        ShellCommand::Import { path } => import(session, &path)?,
        ShellCommand::Exit => return Ok(CommandOutcome::Exit("Bye!".to_string())),
    };

    Ok(CommandOutcome::Continue(text))
}

/// Positions only exist in the full list, so a month filter cannot be used
/// to pick a record to change.
fn reject_month(month: &Option<YearMonth>) -> LedgerResult<()> {
    match month {
        Some(month) => Err(LedgerError::UnsupportedMutation(format!(
            "cannot change records through the {} view; use the position from the full list",
            month
        ))),
        None => Ok(()),
    }
}

fn new_fields<C: Category>(args: AddArgs) -> LedgerResult<RecordFields<C>> {
    let mut fields = RecordFields::new()
        .amount(args.amount)
        .category(args.category.parse()?)
        .date(args.date.unwrap_or_else(|| chrono::Local::now().date_naive()));
    fields.description = args.description;
    Ok(fields)
}

fn edit_fields<C: Category>(args: ModifyArgs) -> LedgerResult<RecordFields<C>> {
    reject_month(&args.month)?;
    let fields = RecordFields {
        amount: args.amount,
        category: args.category.map(|c| c.parse()).transpose()?,
        date: args.date,
        description: args.description,
    };
    if fields.is_empty() {
        return Err(LedgerError::Command(
            "Nothing to change: give at least one of -a, -c, -d or -m".into(),
        ));
    }
    Ok(fields)
}

fn add_expense(session: &mut Session, args: AddArgs) -> LedgerResult<String> {
    let fields: ExpenseFields = new_fields(args)?;
    let added = session.manager.add_expense(fields)?;
    info!(category = %added.expense.category(), amount = added.expense.amount(), "Added expense");

    let mut text = format!(
        "Added expense: {}",
        format_record_details(&added.expense, session.symbol(), session.date_format())
    );
    push_budget_warning(&mut text, added.expense.category(), &added.budget_status);
    Ok(text)
}

fn add_income(session: &mut Session, args: AddArgs) -> LedgerResult<String> {
    let fields: IncomeFields = new_fields(args)?;
    let income = session.manager.add_income(fields)?;
    info!(category = %income.category(), amount = income.amount(), "Added income");

    Ok(format!(
        "Added income: {}",
        format_record_details(&income, session.symbol(), session.date_format())
    ))
}

fn modify_expense(session: &mut Session, args: ModifyArgs) -> LedgerResult<String> {
    let position = args.position;
    let fields: ExpenseFields = edit_fields(args)?;
    let change = session.manager.modify_expense(position, fields)?;
    info!(position, "Modified expense");

    let mut text = describe_change("expense", position, &change.old, &change.new, session);
    push_budget_warning(&mut text, change.new.category(), &change.budget_status);
    Ok(text)
}

fn modify_income(session: &mut Session, args: ModifyArgs) -> LedgerResult<String> {
    let position = args.position;
    let fields: IncomeFields = edit_fields(args)?;
    let change = session.manager.modify_income(position, fields)?;
    info!(position, "Modified income");

    Ok(describe_change("income", position, &change.old, &change.new, session))
}

fn describe_change<C: Category>(
    kind: &str,
    position: usize,
    old: &Record<C>,
    new: &Record<C>,
    session: &Session,
) -> String {
    format!(
        "Modified {} {}:\n  was: {}\n  now: {}",
        kind,
        position,
        format_record_details(old, session.symbol(), session.date_format()),
        format_record_details(new, session.symbol(), session.date_format())
    )
}

fn push_budget_warning(
    text: &mut String,
    category: ExpenseCategory,
    status: &Option<BudgetStatus>,
) {
    if let Some(warning) = status
        .as_ref()
        .and_then(|s| format_budget_status(category, s))
    {
        text.push('\n');
        text.push_str(&warning);
    }
}

fn list(session: &Session, kind: ListKind, month: Option<YearMonth>) -> String {
    let in_month = |date: NaiveDate| month.map_or(true, |m| m.contains(date));
    let mut output = String::new();

    if kind != ListKind::Incomes {
        output.push_str("Expenses\n");
        output.push_str(&format_record_list(
            positioned(session.manager.expenses()).filter(|(_, e)| in_month(e.date())),
            session.symbol(),
            session.date_format(),
        ));
    }

    if kind == ListKind::All {
        output.push('\n');
    }

    if kind != ListKind::Expenses {
        output.push_str("Incomes\n");
        output.push_str(&format_record_list(
            positioned(session.manager.incomes()).filter(|(_, i)| in_month(i.date())),
            session.symbol(),
            session.date_format(),
        ));
    }

    output
}

/// Pair each record with its 1-based position in the full list
fn positioned<T>(records: &[T]) -> impl Iterator<Item = (usize, &T)> {
    records.iter().enumerate().map(|(i, r)| (i + 1, r))
}

fn set_budget(session: &mut Session, category: ExpenseCategory, limit: f64) -> LedgerResult<String> {
    let change = session.manager.set_budget(category, limit)?;
    info!(%category, limit, "Set budget");

    let mut text = format!(
        "Budget for {} set to {}",
        category,
        format_money(session.symbol(), change.budget.limit)
    );
    if let Some(previous) = change.previous {
        text.push_str(&format!(
            " (was {})",
            format_money(session.symbol(), previous.limit)
        ));
    }
    push_budget_warning(&mut text, category, &Some(change.status));
    Ok(text)
}

fn budget(session: &Session, category: Option<ExpenseCategory>) -> LedgerResult<String> {
    match category {
        Some(category) => {
            let summary = session
                .manager
                .budget_summary(category)
                .ok_or_else(|| LedgerError::Command(format!("No budget set for {}", category)))?;
            Ok(format_budget_summary(&summary, session.symbol()))
        }
        None => Ok(format_budget_overview(
            &session.manager.budget_overview(),
            session.symbol(),
        )),
    }
}

fn export(session: &Session, format: ExportFormat, path: &Path) -> LedgerResult<String> {
    let target = session.export_path(path);
    let manager = &session.manager;

    write_atomic(&target, |writer| match format {
        ExportFormat::Csv => export_records_csv(manager, writer, session.date_format()),
        ExportFormat::Budgets => export_budgets_csv(manager, writer),
        ExportFormat::Json => export_json(manager, writer, true),
    })?;

    info!(path = %target.display(), ?format, "Exported ledger");
    Ok(format!("Exported to {}", target.display()))
}

fn import(session: &mut Session, path: &Path) -> LedgerResult<String> {
    let source = session.import_path(path);
    debug!(path = %source.display(), "Importing ledger");

    let file = File::open(&source).map_err(|e| {
        LedgerError::Io(format!("Failed to open {}: {}", source.display(), e))
    })?;
    let (expenses, incomes, budgets) = import_json(BufReader::new(file))?.apply(&mut session.manager)?;

    info!(expenses, incomes, budgets, "Imported ledger");
    Ok(format!(
        "Imported {} expenses, {} incomes and {} budgets from {}",
        expenses,
        incomes,
        budgets,
        source.display()
    ))
}

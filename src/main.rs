use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use fintrack::cli::{self, Session};
use fintrack::config::{FintrackPaths, Settings, HOME_ENV_VAR};
use fintrack::services::FinanceManager;

#[derive(Parser, Debug)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance ledger for the terminal",
    long_about = "fintrack records your incomes and expenses, warns you as spending \
                  approaches a category budget, and exports everything to CSV or JSON. \
                  Commands are read one per line from standard input."
)]
struct Args {
    /// Directory holding config.json and exports
    #[arg(long, env = HOME_ENV_VAR)]
    home: Option<PathBuf>,

    /// Fraction of a budget at which to warn, overriding the settings file
    #[arg(long)]
    threshold: Option<f64>,

    /// Log level (off, error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level);
    trace!("{args:?}");

    let paths = match args.home {
        Some(home) => FintrackPaths::with_base_dir(home),
        None => FintrackPaths::new()?,
    };
    debug!(home = %paths.base_dir().display(), "Resolved home directory");

    let mut settings = Settings::load_or_create(&paths).context("Failed to load settings")?;
    if let Some(threshold) = args.threshold {
        settings.near_budget_threshold = threshold;
    }
    settings.validate()?;

    let manager = FinanceManager::with_threshold(settings.near_budget_threshold)?;
    let mut session = Session::new(manager, settings, paths);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    cli::run(&mut session, stdin.lock(), &mut stdout, interactive)?;

    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // The library and the binary share the crate name
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

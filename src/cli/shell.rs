//! Interactive shell loop
//!
//! Reads one line at a time, runs it, and prints the result. A failing
//! command prints `Error: <message>` and the loop carries on.

use std::io::{BufRead, Write};

use shell_words::split;
use tracing::{debug, warn};

use super::commands::{execute, parse_tokens, CommandOutcome, Session};
use crate::error::LedgerResult;

const PROMPT: &str = "> ";

/// Run the shell until `exit`, `bye` or end of input
///
/// When `interactive` is set a welcome line and a prompt are printed.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    interactive: bool,
) -> LedgerResult<()> {
    if interactive {
        writeln!(out, "Welcome to fintrack. Type 'help' to see the commands.")?;
        write_prompt(out)?;
    }

    for bytes in input.split(b'\n') {
        let outcome = match String::from_utf8(bytes?) {
            Ok(line) => handle_line(session, &line),
            Err(err) => {
                warn!(%err, "Input line is not valid UTF-8");
                Some(CommandOutcome::Continue(
                    "Error: input line is not valid UTF-8".to_string(),
                ))
            }
        };
        match outcome {
            Some(CommandOutcome::Continue(text)) => write_text(out, &text)?,
            Some(CommandOutcome::Exit(text)) => {
                write_text(out, &text)?;
                return Ok(());
            }
            None => {}
        }
        if interactive {
            write_prompt(out)?;
        }
    }

    debug!("End of input");
    if interactive {
        writeln!(out)?;
    }
    Ok(())
}

/// Run one line; `None` for a blank line
pub fn handle_line(session: &mut Session, line: &str) -> Option<CommandOutcome> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    debug!(line = trimmed, "Command received");

    let tokens = match split(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!(%err, "Could not tokenize input");
            return Some(CommandOutcome::Continue(format!("Error: {}", err)));
        }
    };

    let command = match parse_tokens(&tokens) {
        Ok(command) => command,
        Err(outcome) => return Some(outcome),
    };

    match execute(session, command) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            warn!(%err, "Command failed");
            Some(CommandOutcome::Continue(format!("Error: {}", err)))
        }
    }
}

fn write_text<W: Write>(out: &mut W, text: &str) -> LedgerResult<()> {
    if text.ends_with('\n') {
        write!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

fn write_prompt<W: Write>(out: &mut W) -> LedgerResult<()> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FintrackPaths, Settings};
    use crate::services::FinanceManager;
    use tempfile::TempDir;

    fn run_script(dir: &TempDir, script: &str) -> (Session, String) {
        let mut session = Session::new(
            FinanceManager::new(),
            Settings::default(),
            FintrackPaths::with_base_dir(dir.path()),
        );
        let mut out = Vec::new();
        run(&mut session, script.as_bytes(), &mut out, false).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let dir = TempDir::new().unwrap();
        let (session, out) = run_script(
            &dir,
            "add-expense 0 -c food\n\nadd-expense 5 -c food -d 2025-10-01\n",
        );

        assert!(out.contains("Error: Validation error"));
        assert!(out.contains("Added expense: 2025-10-01 | FOOD | $5.00"));
        assert_eq!(session.manager.expenses().len(), 1);
    }

    #[test]
    fn test_exit_stops_reading() {
        let dir = TempDir::new().unwrap();
        let (session, out) = run_script(
            &dir,
            "bye\nadd-expense 5 -c food -d 2025-10-01\n",
        );

        assert!(out.contains("Bye!"));
        assert!(session.manager.expenses().is_empty());
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(
            FinanceManager::new(),
            Settings::default(),
            FintrackPaths::with_base_dir(dir.path()),
        );
        let input: &[u8] = b"add-expense 5 -c food -m caf\xe9\nadd-expense 7 -c food\n";
        let mut out = Vec::new();
        run(&mut session, input, &mut out, false).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Error: input line is not valid UTF-8"));
        assert_eq!(session.manager.expenses().len(), 1);
        assert_eq!(session.manager.expenses()[0].amount(), 7.0);
    }

    #[test]
    fn test_unbalanced_quotes() {
        let dir = TempDir::new().unwrap();
        let (_, out) = run_script(&dir, "add-expense 5 -c food -m \"lunch\n");
        assert!(out.starts_with("Error:"));
    }

    #[test]
    fn test_prompt_when_interactive() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(
            FinanceManager::new(),
            Settings::default(),
            FintrackPaths::with_base_dir(dir.path()),
        );
        let mut out = Vec::new();
        run(&mut session, "exit\n".as_bytes(), &mut out, true).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Welcome to fintrack"));
        assert!(out.contains("> Bye!"));
    }
}

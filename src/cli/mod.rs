//! Command layer
//!
//! Bridges the interactive shell with the service layer: lines are parsed
//! with clap, run against a session, and their output handed back as text.

pub mod commands;
pub mod shell;

pub use commands::{execute, parse_tokens, CommandOutcome, Session, ShellCommand};
pub use shell::{handle_line, run};

//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - Home directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::{FintrackPaths, HOME_ENV_VAR};
pub use settings::Settings;

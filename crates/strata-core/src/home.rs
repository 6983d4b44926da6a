//! Home directory resolution
//!
//! # Precedence
//!
//! 1. `STRATA_HOME` environment variable (if set and non-blank)
//! 2. `dirs::home_dir()` platform default
//!
//! Tests point `STRATA_HOME` at a temporary directory so the user's real
//! config file is never read.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory used to locate the config file.
///
/// # Errors
///
/// Returns an error if `STRATA_HOME` is unset or blank and the platform home
/// directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("STRATA_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().context("Could not determine home directory")
}

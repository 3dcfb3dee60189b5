//! Password acquisition.
//!
//! Passwords come from the first line of a file given with `--password`,
//! or from an interactive prompt when stdin is a terminal.

use std::io::{self, IsTerminal};
use std::path::Path;

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{FileError, Result, ValidationError};

/// Read a password from `file`, or prompt for one.
///
/// With `confirm`, the prompt asks twice.
pub fn acquire(file: Option<&Path>, confirm: bool) -> Result<Zeroizing<String>> {
    if let Some(path) = file {
        debug!(path = %path.display(), "reading password file");
        return from_file(path);
    }

    if !io::stdin().is_terminal() {
        return Err(ValidationError::MissingInput("password".to_string()).into());
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(Zeroizing::new(prompt.interact()?))
}

/// First line of `path`, without its line ending.
pub fn from_file(path: &Path) -> Result<Zeroizing<String>> {
    let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
        FileError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?);
    let line = contents.lines().next().unwrap_or_default();
    Ok(Zeroizing::new(line.to_string()))
}

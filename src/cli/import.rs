//! Import command - load an encrypted key file into the store.

use std::path::{Path, PathBuf};

use crate::cli::{open_manager, output, password};
use crate::error::Result;

/// Import the key in `file`.
pub fn execute(file: &Path, password_file: Option<&Path>, home: Option<PathBuf>) -> Result<()> {
    let password = password::acquire(password_file, false)?;
    let mut manager = open_manager(home)?;
    let record = manager.import(&password, file)?;

    output::success(&format!("imported {}", record.public_key));
    Ok(())
}

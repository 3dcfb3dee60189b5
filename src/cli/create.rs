//! Create commands.

use std::path::{Path, PathBuf};

use crate::cli::{open_manager, output, password};
use crate::error::Result;

/// Create a key in the store and print how to export it.
pub fn execute(password_file: Option<&Path>, home: Option<PathBuf>) -> Result<()> {
    let password = password::acquire(password_file, true)?;
    let mut manager = open_manager(home)?;
    let created = manager.create(&password)?;

    output::data(&created.guidance());
    Ok(())
}

/// Create a weakly-encrypted testing key, written only to `file`.
pub fn execute_weak(
    file: Option<&Path>,
    password_file: Option<&Path>,
    home: Option<PathBuf>,
) -> Result<()> {
    let password = password::acquire(password_file, true)?;
    let manager = open_manager(home)?;
    let key = manager.create_and_export_weak(&password, file)?;

    output::warn("Don't use this key for anything sensitive!");
    if let Some(path) = file {
        output::success(&format!("wrote {} to {}", key, path.display()));
    }
    Ok(())
}

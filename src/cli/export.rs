//! Export command - write a stored key to an encrypted key file.

use std::path::{Path, PathBuf};

use crate::cli::{open_manager, output};
use crate::error::Result;

/// Export `public_key` to `file`, which must not exist yet.
pub fn execute(public_key: &str, file: &Path, home: Option<PathBuf>) -> Result<()> {
    let manager = open_manager(home)?;
    manager.export(public_key, file)?;

    output::success(&format!("exported {} to {}", public_key.trim(), file.display()));
    Ok(())
}

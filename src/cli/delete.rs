//! Delete command - archive or purge a key.
//!
//! Deleting here does not make a running service forget a key it already
//! holds unlocked.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use dialoguer::Confirm;

use crate::cli::{open_manager, output};
use crate::core::key::PublicKey;
use crate::core::manager::{self, DeleteOutcome};
use crate::core::store::Lifecycle;
use crate::error::Result;

/// Delete a key after confirmation.
pub fn execute(public_key: &str, hard: bool, yes: bool, home: Option<PathBuf>) -> Result<()> {
    let key = manager::parse_key(public_key)?;
    let mut manager = open_manager(home)?;
    let confirmed = yes || confirm(&key, hard)?;

    match manager.delete(&key.to_string(), hard, confirmed)? {
        DeleteOutcome::Declined => {
            output::hint("cancelled");
            if !yes && !io::stdin().is_terminal() {
                output::hint("pass --yes to delete without a prompt");
            }
        }
        DeleteOutcome::Done(Lifecycle::Purged) => output::success(&format!("purged {}", key)),
        DeleteOutcome::Done(_) => output::success(&format!("archived {}", key)),
    }
    Ok(())
}

/// Ask the operator; non-interactive sessions count as declined.
fn confirm(key: &PublicKey, hard: bool) -> Result<bool> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }

    let prompt = if hard {
        format!("Permanently delete {}? This cannot be undone", key)
    } else {
        format!("Archive {}?", key)
    };

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(Into::into)
}

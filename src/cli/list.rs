//! List command - show stored keys as a table or JSON.

use std::path::PathBuf;

use crate::cli::{open_manager, output};
use crate::core::manager::ListScope;
use crate::core::presenter::{Presenter, HEADERS};
use crate::error::Result;

/// List keys.
pub fn execute(json: bool, all: bool, home: Option<PathBuf>) -> Result<()> {
    let manager = open_manager(home)?;
    let scope = if all { ListScope::All } else { ListScope::Active };
    let presenters = manager.list(scope)?;

    if json {
        output::data(&serde_json::to_string_pretty(&presenters)?);
    } else if presenters.is_empty() {
        output::dimmed("no keys stored");
        output::hint(&format!("run: {}", output::cmd("vrfkey create")));
    } else {
        output::header(&format!("🔑 VRF Keys ({})", presenters.len()));
        render_table(&presenters);
    }
    Ok(())
}

fn render_table(presenters: &[Presenter]) {
    let rows: Vec<[String; 6]> = presenters.iter().map(Presenter::to_row).collect();

    let mut widths = HEADERS.map(|h| h.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    output::data(&line(&HEADERS));
    output::rule_of(widths.iter().sum::<usize>() + 2 * (widths.len() - 1));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        output::data(&line(&cells));
    }
}

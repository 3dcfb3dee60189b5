//! Config command - show or initialize the configuration.

use std::path::PathBuf;

use crate::cli::{load_config, output};
use crate::core::config::Config;
use crate::error::Result;

/// Print the resolved configuration, optionally writing the defaults.
pub fn execute(init: bool, home: Option<PathBuf>) -> Result<()> {
    let config = load_config(home)?;

    if init {
        if config.save_new()? {
            output::success(&format!(
                "wrote {}",
                Config::config_path(&config.home).display()
            ));
        } else {
            output::warn("config.toml already exists, leaving it unchanged");
        }
    }

    output::header("Configuration");
    output::rule();
    output::kv("home:       ", config.home.display());
    output::kv("store:      ", config.store_path().display());
    output::kv("memory_kib: ", config.kdf.memory_kib);
    output::kv("iterations: ", config.kdf.iterations);
    output::kv("parallelism:", config.kdf.parallelism);
    Ok(())
}

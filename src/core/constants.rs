//! Constants used throughout vrfkey.
//!
//! Centralizes magic strings and configuration values.

/// Home directory relative to the user's home (~/.vrfkey).
pub const HOME_DIR: &str = ".vrfkey";

/// Environment variable overriding the vrfkey home directory.
pub const HOME_ENV: &str = "VRFKEY_HOME";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "VRFKEY_LOG";

/// Configuration file name inside the home directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default records file name inside the home directory.
pub const STORE_FILE: &str = "keys.json";

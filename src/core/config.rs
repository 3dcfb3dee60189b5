//! Configuration file management.
//!
//! Handles the optional `config.toml` in the vrfkey home directory. The
//! loaded [`Config`] is passed explicitly to the keystore it configures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::keyfile::KdfParams;
use crate::error::{ConfigError, Result};

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Home directory the config was loaded from
    #[serde(skip)]
    pub home: PathBuf,
    #[serde(default)]
    pub store: StoreConfig,
    /// argon2id parameters for keys persisted to the store
    #[serde(default)]
    pub kdf: KdfParams,
}

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Records file, relative to the home directory unless absolute
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::STORE_FILE),
        }
    }
}

impl Config {
    /// Default configuration rooted at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            store: StoreConfig::default(),
            kdf: KdfParams::default(),
        }
    }

    /// Resolve the home directory: explicit value, else `~/.vrfkey`.
    ///
    /// The `VRFKEY_HOME` environment variable arrives through the CLI's
    /// `--home` flag.
    pub fn resolve_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
        match explicit {
            Some(home) => Ok(home),
            None => dirs::home_dir()
                .map(|h| h.join(constants::HOME_DIR))
                .ok_or_else(|| ConfigError::NoHome.into()),
        }
    }

    /// Path to `config.toml` under `home`.
    pub fn config_path(home: &Path) -> PathBuf {
        home.join(constants::CONFIG_FILE)
    }

    /// Load `config.toml` from `home`, falling back to defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::Invalid` if the KDF parameters are unusable.
    pub fn load(home: &Path) -> Result<Self> {
        let path = Self::config_path(home);
        debug!(path = %path.display(), "loading config");

        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str::<Self>(&contents)
                .map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file, using defaults");
                Self::new(home)
            }
            Err(source) => return Err(ConfigError::Read { path, source }.into()),
        };
        config.home = home.to_path_buf();
        config.validate()?;

        debug!(
            store = %config.store_path().display(),
            memory_kib = config.kdf.memory_kib,
            iterations = config.kdf.iterations,
            "config loaded"
        );
        Ok(config)
    }

    /// Write `config.toml` under the home directory.
    ///
    /// Returns `false` without touching anything if the file already exists.
    pub fn save_new(&self) -> Result<bool> {
        let path = Self::config_path(&self.home);
        if path.exists() {
            return Ok(false);
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::create_dir_all(&self.home)?;
        std::fs::write(&path, contents)?;
        Ok(true)
    }

    /// Validate the configuration contents.
    pub fn validate(&self) -> Result<()> {
        self.kdf
            .validate()
            .map_err(|reason| ConfigError::Invalid(format!("kdf: {}", reason)))?;
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store.path must not be empty".to_string()).into());
        }
        Ok(())
    }

    /// Records file, resolved against the home directory.
    pub fn store_path(&self) -> PathBuf {
        if self.store.path.is_absolute() {
            self.store.path.clone()
        } else {
            self.home.join(&self.store.path)
        }
    }
}

//! Error types.
//!
//! Errors are grouped by concern and folded into a single [`Error`] so
//! commands can propagate anything with `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Import refused because the key is already active in the store.
    #[error("{source}")]
    DuplicateImport {
        conflict: ImportConflict,
        #[source]
        source: StoreError,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),
}

impl Error {
    /// Operator guidance to print after the error message, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::DuplicateImport { conflict, .. } => Some(conflict.guidance()),
            Error::Store(StoreError::NotFound(key)) => Some(format!(
                "{} is not in the store; run `vrfkey list --all` to see stored keys",
                key
            )),
            Error::Validation(ValidationError::MissingInput(what)) if what == "password" => Some(
                "pass --password <file> whose first line is a non-empty password, or run interactively"
                    .to_string(),
            ),
            Error::File(FileError::Conflict(_)) => {
                Some("move the existing file or choose another path".to_string())
            }
            Error::Config(ConfigError::Parse { path, .. }) => {
                Some(format!("fix or remove {}", path.display()))
            }
            _ => None,
        }
    }
}

/// Input validation failures, detected before anything is mutated.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("must specify {0}")]
    MissingInput(String),
}

/// Public key codec and derivation failures.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("failed to parse public key: {0}")]
    Malformed(String),

    /// Only ever surfaces as a diagnostic string in display output.
    #[error("{0}")]
    Derivation(String),
}

/// Local file failures around export and import.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("refusing to overwrite existing file {0}. Please move it or change the save path")]
    Conflict(PathBuf),

    #[error("failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not save encrypted key for {public_key} to {path}: {source}")]
    Write {
        path: PathBuf,
        public_key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("while checking whether file {path} exists: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Keystore failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("the store already has an entry for public key {0}")]
    DuplicateKey(String),

    #[error("no entry for this key: {0}")]
    NotFound(String),

    #[error("import failed: {0}")]
    Import(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("records file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("store failure: {0}")]
    Backend(String),
}

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory (set VRFKEY_HOME or pass --home)")]
    NoHome,

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Details of a refused import, extracted from the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConflict {
    /// Public key read from the input file, or why it could not be read.
    pub public_key: std::result::Result<String, String>,
}

impl ImportConflict {
    /// Remediation text naming the conflicting key.
    pub fn guidance(&self) -> String {
        match &self.public_key {
            Ok(key) => format!(
                "The store already has an entry for that public key.\n\
                 If you want to import the new key anyway, delete the old key with the command\n\n    \
                 vrfkey delete --public-key {key}\n\n\
                 (but maybe back it up first, with `vrfkey export --file <backup_path> --public-key {key}`.)"
            ),
            Err(reason) => format!(
                "The store already has an entry for that public key.\n\
                 could not extract public key from input file: {reason}"
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

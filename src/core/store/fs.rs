//! Filesystem-backed keystore.
//!
//! Records live in a single JSON file (`~/.vrfkey/keys.json` by default).
//! Each mutation reloads the file, applies the change and rewrites it
//! through a temporary sibling and a rename.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{import_into, KeyRecord, Keystore, Records};
use crate::core::config::Config;
use crate::core::key::PublicKey;
use crate::core::keyfile::{EncryptedKeyFile, KdfParams};
use crate::error::{Result, StoreError};

/// Keystore persisted to a JSON records file.
#[derive(Debug, Clone)]
pub struct Filesystem {
    path: PathBuf,
    kdf: KdfParams,
}

impl Filesystem {
    /// Open the store described by `config`. Nothing is read until used.
    pub fn open(config: &Config) -> Self {
        Self {
            path: config.store_path(),
            kdf: config.kdf,
        }
    }

    pub fn at(path: impl Into<PathBuf>, kdf: KdfParams) -> Self {
        Self {
            path: path.into(),
            kdf,
        }
    }

    /// Records file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Records> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no records file, store is empty");
                return Ok(Records::new());
            }
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                ))
                .into())
            }
        };

        let records: Records = serde_json::from_slice(&contents).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %self.path.display(), records = records.len(), "records loaded");
        Ok(records)
    }

    fn save(&self, records: &Records) -> Result<()> {
        let backend = |e: std::io::Error| {
            StoreError::Backend(format!("failed to write {}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(backend)?;
            }
        }

        let contents = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        let written = write_private(&tmp, &contents).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(backend(e).into());
        }
        debug!(path = %self.path.display(), records = records.len(), "records saved");
        Ok(())
    }

    /// Load, apply `f`, and save only if `f` succeeded.
    fn update<T>(&self, f: impl FnOnce(&mut Records) -> Result<T>) -> Result<T> {
        let mut records = self.load()?;
        let out = f(&mut records)?;
        self.save(&records)?;
        Ok(out)
    }
}

/// Write `contents` to a fresh file at `path` readable only by the owner.
///
/// A leftover file at `path` is removed first so the mode always applies.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

impl Keystore for Filesystem {
    fn create(&mut self, password: &str) -> Result<KeyRecord> {
        let record = KeyRecord::new(EncryptedKeyFile::generate(password, self.kdf)?);
        let record = self.update(|records| records.insert(record))?;
        debug!(public_key = %record.public_key, "created key in records file");
        Ok(record)
    }

    fn import(&mut self, encrypted: &[u8], password: &str) -> Result<KeyRecord> {
        let record = self.update(|records| import_into(records, encrypted, password))?;
        debug!(public_key = %record.public_key, "imported key into records file");
        Ok(record)
    }

    fn lookup(&self, key: &PublicKey) -> Result<EncryptedKeyFile> {
        Ok(self.load()?.get(key)?.secret.clone())
    }

    fn archive(&mut self, key: &PublicKey) -> Result<()> {
        self.update(|records| records.archive(key))?;
        debug!(public_key = %key, "archived key");
        Ok(())
    }

    fn purge(&mut self, key: &PublicKey) -> Result<()> {
        self.update(|records| records.purge(key))?;
        debug!(public_key = %key, "purged key");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<PublicKey>> {
        Ok(self.load()?.keys(false))
    }

    fn list_archived(&self) -> Result<Vec<PublicKey>> {
        Ok(self.load()?.keys(true))
    }

    fn record_for(&self, key: &PublicKey) -> Result<KeyRecord> {
        self.load()?.get(key).cloned()
    }
}

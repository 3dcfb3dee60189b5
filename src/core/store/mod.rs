//! Keystore abstraction.
//!
//! The lifecycle manager only talks to a [`Keystore`]. Two backends ship
//! with the crate:
//!
//! - [`Filesystem`]: a JSON records file under the vrfkey home
//! - [`Memory`]: process-local, used by tests
//!
//! Both keep their records in a [`Records`] collection so the archive and
//! purge rules live in one place.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Keystore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::key::PublicKey;
use crate::core::keyfile::{EncryptedKeyFile, KdfParams};
use crate::error::{Result, StoreError};

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::Memory;

/// Lifecycle state held by a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyState {
    Active,
    Archived { at: DateTime<Utc> },
}

/// Where a key ends up after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Archived,
    Purged,
}

/// The persisted unit of the keystore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub public_key: PublicKey,
    pub secret: EncryptedKeyFile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: KeyState,
}

impl KeyRecord {
    /// Wrap a freshly encrypted key in an active record.
    pub fn new(secret: EncryptedKeyFile) -> Self {
        let now = Utc::now();
        Self {
            public_key: secret.public_key,
            secret,
            created_at: now,
            updated_at: now,
            state: KeyState::Active,
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self.state, KeyState::Archived { .. })
    }

    /// Archive timestamp, if archived.
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self.state {
            KeyState::Active => None,
            KeyState::Archived { at } => Some(at),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.state {
            KeyState::Active => Lifecycle::Active,
            KeyState::Archived { .. } => Lifecycle::Archived,
        }
    }
}

/// Contract between the lifecycle manager and a key store.
///
/// Every call is a single transaction; nothing spans two calls.
pub trait Keystore {
    /// Generate, encrypt and persist a new key.
    fn create(&mut self, password: &str) -> Result<KeyRecord>;

    /// Generate a key with cheap KDF parameters. Never persisted.
    fn create_weak(&self, password: &str) -> Result<KeyRecord> {
        Ok(KeyRecord::new(EncryptedKeyFile::generate(
            password,
            KdfParams::WEAK,
        )?))
    }

    /// Decrypt and persist an exported key file.
    ///
    /// # Errors
    ///
    /// `StoreError::DuplicateKey` if the key is already active.
    fn import(&mut self, encrypted: &[u8], password: &str) -> Result<KeyRecord>;

    /// Encrypted key file for an active or archived key.
    fn lookup(&self, key: &PublicKey) -> Result<EncryptedKeyFile>;

    /// Soft-delete. Fails with `StoreError::NotFound` unless the key is active.
    fn archive(&mut self, key: &PublicKey) -> Result<()>;

    /// Hard-delete an active or archived key.
    fn purge(&mut self, key: &PublicKey) -> Result<()>;

    /// Active keys, in creation order.
    fn list_all(&self) -> Result<Vec<PublicKey>>;

    /// Archived keys, in creation order.
    fn list_archived(&self) -> Result<Vec<PublicKey>>;

    /// Full record for an active or archived key.
    fn record_for(&self, key: &PublicKey) -> Result<KeyRecord>;
}

/// An ordered collection of records with the lifecycle rules applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Records(Vec<KeyRecord>);

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, key: &PublicKey) -> Option<usize> {
        self.0.iter().position(|r| &r.public_key == key)
    }

    pub fn get(&self, key: &PublicKey) -> Result<&KeyRecord> {
        self.0
            .iter()
            .find(|r| &r.public_key == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()).into())
    }

    /// Fails with `StoreError::DuplicateKey` if `key` is already active.
    pub fn check_vacant(&self, key: &PublicKey) -> Result<()> {
        match self.position(key) {
            Some(i) if !self.0[i].is_archived() => {
                Err(StoreError::DuplicateKey(key.to_string()).into())
            }
            _ => Ok(()),
        }
    }

    /// Add a new record. An archived record for the same key is replaced.
    pub fn insert(&mut self, record: KeyRecord) -> Result<KeyRecord> {
        self.check_vacant(&record.public_key)?;
        match self.position(&record.public_key) {
            Some(i) => {
                let existing = &mut self.0[i];
                existing.secret = record.secret;
                existing.updated_at = Utc::now();
                existing.state = KeyState::Active;
                debug!(public_key = %existing.public_key, "reactivated archived key");
                Ok(existing.clone())
            }
            None => {
                self.0.push(record.clone());
                Ok(record)
            }
        }
    }

    pub fn archive(&mut self, key: &PublicKey) -> Result<()> {
        let record = self
            .0
            .iter_mut()
            .find(|r| &r.public_key == key && !r.is_archived())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let now = Utc::now();
        record.state = KeyState::Archived { at: now };
        record.updated_at = now;
        Ok(())
    }

    pub fn purge(&mut self, key: &PublicKey) -> Result<()> {
        let i = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        self.0.remove(i);
        Ok(())
    }

    pub fn keys(&self, archived: bool) -> Vec<PublicKey> {
        self.0
            .iter()
            .filter(|r| r.is_archived() == archived)
            .map(|r| r.public_key)
            .collect()
    }
}

/// Parse an import payload and add it to `records`.
///
/// The duplicate check runs before decryption, so an active key is
/// reported as `DuplicateKey` whatever password was given.
pub(crate) fn import_into(
    records: &mut Records,
    encrypted: &[u8],
    password: &str,
) -> Result<KeyRecord> {
    let file = EncryptedKeyFile::from_json(encrypted)?;
    records.check_vacant(&file.public_key)?;
    file.decrypt(password)?;
    records.insert(KeyRecord::new(file))
}

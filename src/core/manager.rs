//! Key lifecycle operations.
//!
//! [`KeyManager`] sits between the command line and a [`Keystore`]. Each
//! method is one self-contained transaction: inputs are validated before
//! anything is mutated, store errors that an operator can act on are
//! translated into guidance, and display derivations never abort an
//! operation.
//!
//! The manager only sees this process's view of the store. A running
//! service that already holds a key unlocked is not affected by a delete
//! here.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::key::{Derivations, PublicKey, Secp256k1};
use crate::core::keyfile::EncryptedKeyFile;
use crate::core::presenter::{self, Derived, Presenter};
use crate::core::store::{KeyRecord, Keystore, Lifecycle};
use crate::error::{Error, FileError, ImportConflict, Result, StoreError, ValidationError};

/// A newly created key, with its display forms.
#[derive(Debug, Clone)]
pub struct CreatedKey {
    pub record: KeyRecord,
    pub uncompressed: Derived,
    pub hash: Derived,
}

impl CreatedKey {
    pub fn public_key(&self) -> &PublicKey {
        &self.record.public_key
    }

    /// Follow-up command that exports the new key.
    pub fn export_command(&self) -> String {
        format!(
            "vrfkey export --file <save_path> --public-key {}",
            self.record.public_key
        )
    }

    /// Operator guidance printed after creation.
    pub fn guidance(&self) -> String {
        format!(
            "Created keypair.\n\n\
             Compressed public key (use this for interactions with the node):\n{}\n\
             Uncompressed public key (use this to register the key with the VRF coordinator):\n{}\n\
             Hash of public key (use this to request randomness from your consuming contract):\n{}\n\n\
             The following command will export the encrypted secret key from the store to <save_path>:\n\n\
             {}",
            self.record.public_key,
            self.uncompressed,
            self.hash,
            self.export_command()
        )
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator did not confirm; nothing happened.
    Declined,
    /// The key is now in this lifecycle state.
    Done(Lifecycle),
}

/// Which keys a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    #[default]
    Active,
    /// Active keys followed by archived ones.
    All,
}

/// Orchestrates key lifecycle operations against a keystore.
pub struct KeyManager<S> {
    store: S,
    derive: Box<dyn Derivations>,
}

impl<S: Keystore> KeyManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            derive: Box::new(Secp256k1),
        }
    }

    /// Replace the display derivations.
    pub fn with_derivations(mut self, derive: impl Derivations + 'static) -> Self {
        self.derive = Box::new(derive);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Generate and persist a new key.
    pub fn create(&mut self, password: &str) -> Result<CreatedKey> {
        require("password", password)?;

        let record = self.store.create(password)?;
        info!(public_key = %record.public_key, "created key");

        let uncompressed = presenter::uncompressed(self.derive.as_ref(), &record.public_key);
        let hash = presenter::hash(self.derive.as_ref(), &record.public_key);
        Ok(CreatedKey {
            record,
            uncompressed,
            hash,
        })
    }

    /// Generate a cheaply-encrypted key and write it straight to `destination`.
    ///
    /// The durable store is never touched.
    pub fn create_and_export_weak(
        &self,
        password: &str,
        destination: Option<&Path>,
    ) -> Result<PublicKey> {
        require("password", password)?;
        let destination = destination
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                ValidationError::MissingInput(
                    "path to key file which does not already exist".to_string(),
                )
            })?;
        ensure_vacant(destination)?;

        let record = self.store.create_weak(password)?;
        record.secret.write_new(destination)?;
        info!(public_key = %record.public_key, path = %destination.display(), "wrote weak testing key");
        Ok(record.public_key)
    }

    /// Import an exported key file.
    ///
    /// # Errors
    ///
    /// `Error::DuplicateImport` if the key is already active, carrying
    /// remediation guidance read from the input file.
    pub fn import(&mut self, password: &str, source: &Path) -> Result<KeyRecord> {
        require("password", password)?;
        if source.as_os_str().is_empty() {
            return Err(ValidationError::MissingInput("key file".to_string()).into());
        }

        let bytes = std::fs::read(source).map_err(|e| FileError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        debug!(path = %source.display(), bytes = bytes.len(), "read key file");

        match self.store.import(&bytes, password) {
            Ok(record) => {
                info!(public_key = %record.public_key, "imported key");
                Ok(record)
            }
            Err(Error::Store(err @ StoreError::DuplicateKey(_))) => {
                let conflict = ImportConflict {
                    public_key: EncryptedKeyFile::peek_public_key(&bytes),
                };
                match &conflict.public_key {
                    Ok(key) => warn!(public_key = %key, "store already has an entry for this key"),
                    Err(e) => warn!(error = %e, "could not extract public key from input file"),
                }
                Err(Error::DuplicateImport {
                    conflict,
                    source: err,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Export the encrypted key to a file that must not already exist.
    pub fn export(&self, public_key: &str, destination: &Path) -> Result<()> {
        let key = parse_key(public_key)?;
        if destination.as_os_str().is_empty() {
            return Err(ValidationError::MissingInput("file to export to".to_string()).into());
        }
        ensure_vacant(destination)?;

        let file = self.store.lookup(&key)?;
        file.write_new(destination)?;
        info!(public_key = %key, path = %destination.display(), "exported key");
        Ok(())
    }

    /// Archive (`hard = false`) or purge (`hard = true`) a key.
    ///
    /// Returns `DeleteOutcome::Declined` without error when `confirmed` is false.
    pub fn delete(&mut self, public_key: &str, hard: bool, confirmed: bool) -> Result<DeleteOutcome> {
        let key = parse_key(public_key)?;
        if !confirmed {
            debug!(public_key = %key, "delete not confirmed");
            return Ok(DeleteOutcome::Declined);
        }

        let result = if hard {
            self.store.purge(&key).map(|_| Lifecycle::Purged)
        } else {
            self.store.archive(&key).map(|_| Lifecycle::Archived)
        };

        match result {
            Ok(state) => {
                info!(public_key = %key, hard, "deleted key");
                Ok(DeleteOutcome::Done(state))
            }
            Err(e @ Error::Store(StoreError::NotFound(_))) => {
                warn!(public_key = %key, "there is already no entry in the store for this key");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Presenters for the keys in `scope`, in store order.
    ///
    /// Per-key derivation or lookup failures degrade that row; only a
    /// failure to list the keys at all is returned as an error.
    pub fn list(&self, scope: ListScope) -> Result<Vec<Presenter>> {
        let mut keys = self.store.list_all()?;
        if scope == ListScope::All {
            keys.extend(self.store.list_archived()?);
        }

        let presenters: Vec<_> = keys
            .iter()
            .map(|key| Presenter::fetch(self.derive.as_ref(), &self.store, key))
            .collect();
        debug!(count = presenters.len(), "listed keys");
        Ok(presenters)
    }
}

fn require(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::MissingInput(what.to_string()).into());
    }
    Ok(())
}

/// Parse operator input into a key; empty input is a missing argument.
pub fn parse_key(text: &str) -> Result<PublicKey> {
    if text.trim().is_empty() {
        return Err(ValidationError::MissingInput("public key".to_string()).into());
    }
    PublicKey::parse(text)
}

/// Fail with `FileConflict` if something already exists at `path`.
///
/// Racy against concurrent writers; the exclusive create in
/// [`EncryptedKeyFile::write_new`] is the final check.
fn ensure_vacant(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Err(FileError::Conflict(path.to_path_buf()).into()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(FileError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}

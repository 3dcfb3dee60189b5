//! In-memory keystore.

use tracing::debug;

use super::{import_into, KeyRecord, Keystore, Records};
use crate::core::key::PublicKey;
use crate::core::keyfile::{EncryptedKeyFile, KdfParams};
use crate::error::Result;

/// Keystore that lives for the duration of the process.
#[derive(Debug, Default)]
pub struct Memory {
    records: Records,
    kdf: KdfParams,
}

impl Memory {
    pub fn new(kdf: KdfParams) -> Self {
        Self {
            records: Records::new(),
            kdf,
        }
    }

    /// Number of records, archived ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Keystore for Memory {
    fn create(&mut self, password: &str) -> Result<KeyRecord> {
        let record = KeyRecord::new(EncryptedKeyFile::generate(password, self.kdf)?);
        debug!(public_key = %record.public_key, "created key in memory");
        self.records.insert(record)
    }

    fn import(&mut self, encrypted: &[u8], password: &str) -> Result<KeyRecord> {
        import_into(&mut self.records, encrypted, password)
    }

    fn lookup(&self, key: &PublicKey) -> Result<EncryptedKeyFile> {
        Ok(self.records.get(key)?.secret.clone())
    }

    fn archive(&mut self, key: &PublicKey) -> Result<()> {
        self.records.archive(key)
    }

    fn purge(&mut self, key: &PublicKey) -> Result<()> {
        self.records.purge(key)
    }

    fn list_all(&self) -> Result<Vec<PublicKey>> {
        Ok(self.records.keys(false))
    }

    fn list_archived(&self) -> Result<Vec<PublicKey>> {
        Ok(self.records.keys(true))
    }

    fn record_for(&self, key: &PublicKey) -> Result<KeyRecord> {
        self.records.get(key).cloned()
    }
}

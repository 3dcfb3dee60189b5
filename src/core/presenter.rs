//! Display views of stored keys.
//!
//! A [`Presenter`] is built fresh for each listing. Derived fields that
//! cannot be computed are replaced with a diagnostic string so a single
//! bad record never blanks the rest of a listing.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::info;

use crate::core::key::{Derivations, PublicKey};
use crate::core::store::{KeyRecord, Keystore};

/// A best-effort derived field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived {
    Value(String),
    Diagnostic(String),
}

impl Derived {
    /// Text shown to the operator, whichever variant this is.
    pub fn as_str(&self) -> &str {
        match self {
            Derived::Value(v) => v,
            Derived::Diagnostic(d) => d,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Derived::Value(_))
    }
}

impl fmt::Display for Derived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Derived {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Uncompressed form of `key`, or a diagnostic.
pub fn uncompressed(derive: &dyn Derivations, key: &PublicKey) -> Derived {
    match derive.uncompressed(key) {
        Ok(v) => Derived::Value(v),
        Err(e) => {
            info!(public_key = %key, error = %e, "could not compute uncompressed form");
            Derived::Diagnostic(format!(
                "error while computing uncompressed representation: {}",
                e
            ))
        }
    }
}

/// Hash of `key`, or a diagnostic.
pub fn hash(derive: &dyn Derivations, key: &PublicKey) -> Derived {
    match derive.hash(key) {
        Ok(h) => Derived::Value(h.hex()),
        Err(e) => {
            info!(public_key = %key, error = %e, "could not compute hash");
            Derived::Diagnostic(format!("error while computing hash of public key: {}", e))
        }
    }
}

/// Read-only view of one key for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presenter {
    pub compressed: String,
    pub uncompressed: Derived,
    pub hash: Derived,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Table column headers, in [`Presenter::to_row`] order.
pub const HEADERS: [&str; 6] = ["Compressed", "Uncompressed", "Hash", "Created", "Updated", "Deleted"];

impl Presenter {
    /// Build a presenter from a key and its record, if the record was found.
    pub fn build(derive: &dyn Derivations, key: &PublicKey, record: Option<&KeyRecord>) -> Self {
        Self {
            compressed: key.to_string(),
            uncompressed: uncompressed(derive, key),
            hash: hash(derive, key),
            created_at: record.map(|r| r.created_at),
            updated_at: record.map(|r| r.updated_at),
            deleted_at: record.and_then(|r| r.deleted_at()),
        }
    }

    /// Build a presenter, fetching timestamps from the store.
    ///
    /// A failed record lookup leaves all three timestamps absent.
    pub fn fetch(derive: &dyn Derivations, store: &dyn Keystore, key: &PublicKey) -> Self {
        let record = match store.record_for(key) {
            Ok(record) => Some(record),
            Err(e) => {
                info!(public_key = %key, error = %e, "could not load record timestamps");
                None
            }
        };
        Self::build(derive, key, record.as_ref())
    }

    pub fn friendly_created_at(&self) -> String {
        friendly(self.created_at)
    }

    pub fn friendly_updated_at(&self) -> String {
        friendly(self.updated_at)
    }

    pub fn friendly_deleted_at(&self) -> String {
        friendly(self.deleted_at)
    }

    /// Cells for a table row.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.compressed.clone(),
            self.uncompressed.to_string(),
            self.hash.to_string(),
            self.friendly_created_at(),
            self.friendly_updated_at(),
            self.friendly_deleted_at(),
        ]
    }
}

fn friendly(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}

//! VRF public keys.
//!
//! A key is a secp256k1 point. Its external form is the compressed SEC1
//! encoding in `0x`-prefixed lowercase hex; the uncompressed form is the
//! 64 bytes of the x and y coordinates, and the hash is keccak-256 over
//! those same 64 bytes.

use std::fmt;
use std::str::FromStr;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::{KeyError, Result};

/// Length of a compressed SEC1 point.
pub const COMPRESSED_LEN: usize = 33;

/// A VRF public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(k256::PublicKey);

impl PublicKey {
    /// Parse the canonical hex text of a compressed point.
    ///
    /// Accepts an optional `0x` prefix and surrounding whitespace.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(KeyError::Malformed("empty public key".to_string()).into());
        }
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(digits).map_err(|e| KeyError::Malformed(e.to_string()))?;
        if bytes.len() != COMPRESSED_LEN {
            return Err(KeyError::Malformed(format!(
                "expected {} bytes of compressed point, got {}",
                COMPRESSED_LEN,
                bytes.len()
            ))
            .into());
        }

        let point = k256::PublicKey::from_sec1_bytes(&bytes)
            .map_err(|_| KeyError::Malformed(format!("{} is not a point on the curve", trimmed)))?;
        Ok(Self(point))
    }

    /// Canonical compressed hex text.
    pub fn format(&self) -> String {
        format!("0x{}", hex::encode(self.compressed_bytes()))
    }

    pub fn compressed_bytes(&self) -> [u8; COMPRESSED_LEN] {
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(self.0.to_encoded_point(true).as_bytes());
        out
    }

    /// The x and y coordinates, 32 bytes each.
    pub fn coordinates(&self) -> Result<[u8; 64]> {
        let point = self.0.to_encoded_point(false);
        match (point.x(), point.y()) {
            (Some(x), Some(y)) => {
                let mut out = [0u8; 64];
                out[..32].copy_from_slice(x);
                out[32..].copy_from_slice(y);
                Ok(out)
            }
            _ => Err(KeyError::Derivation("point has no affine coordinates".to_string()).into()),
        }
    }

    /// `0x`-prefixed hex of the uncompressed coordinates.
    pub fn uncompressed(&self) -> Result<String> {
        Ok(format!("0x{}", hex::encode(self.coordinates()?)))
    }

    /// keccak-256 of the uncompressed coordinates.
    pub fn hash(&self) -> Result<KeyHash> {
        let digest = Keccak256::digest(self.coordinates()?);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Ok(KeyHash(out))
    }

    pub(crate) fn from_point(point: k256::PublicKey) -> Self {
        Self(point)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.format())
    }
}

impl FromStr for PublicKey {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Content hash of a public key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeyHash([u8; 32]);

impl KeyHash {
    pub fn hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Display-only forms derived from a public key.
///
/// Separated from [`PublicKey`] so listing can be exercised against
/// derivations that fail.
pub trait Derivations {
    fn uncompressed(&self, key: &PublicKey) -> Result<String>;
    fn hash(&self, key: &PublicKey) -> Result<KeyHash>;
}

/// The secp256k1 derivations used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1;

impl Derivations for Secp256k1 {
    fn uncompressed(&self, key: &PublicKey) -> Result<String> {
        key.uncompressed()
    }

    fn hash(&self, key: &PublicKey) -> Result<KeyHash> {
        key.hash()
    }
}

//! Portable encrypted key files.
//!
//! A key file holds one secret scalar encrypted with XChaCha20-Poly1305
//! under an argon2id-derived key. The public key travels in clear text so
//! a file can be identified without the password, and it is bound as
//! associated data so editing it breaks decryption.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::key::PublicKey;
use crate::error::{FileError, Result, StoreError};

/// Current key file format version.
pub const FORMAT_VERSION: u32 = 1;

const CIPHER: &str = "xchacha20poly1305";
const KDF: &str = "argon2id";
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 24;
const SECRET_LEN: usize = 32;

/// argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl KdfParams {
    /// Deliberately cheap parameters for throwaway keys.
    pub const WEAK: KdfParams = KdfParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    };

    /// Check the parameters are acceptable to argon2.
    pub fn validate(&self) -> std::result::Result<(), String> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, Some(32))
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, Some(32))
            .map_err(|e| StoreError::Encryption(format!("invalid argon2 parameters: {}", e)))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = Zeroizing::new([0u8; 32]);
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut key[..])
            .map_err(|e| StoreError::Encryption(format!("key derivation failed: {}", e)))?;
        Ok(key)
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 1,
        }
    }
}

/// Cipher and KDF section of a key file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crypto {
    pub cipher: String,
    pub ciphertext: String,
    pub nonce: String,
    pub kdf: String,
    pub kdfparams: StoredKdfParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredKdfParams {
    #[serde(flatten)]
    pub params: KdfParams,
    pub salt: String,
}

/// A password-protected secret key, independent of any store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedKeyFile {
    pub public_key: PublicKey,
    pub crypto: Crypto,
    pub version: u32,
}

impl EncryptedKeyFile {
    /// Generate a fresh key pair and encrypt its secret.
    pub fn generate(password: &str, params: KdfParams) -> Result<Self> {
        let secret = k256::SecretKey::random(&mut OsRng);
        Self::encrypt(&secret, password, params)
    }

    /// Encrypt a secret key under `password`.
    pub fn encrypt(secret: &k256::SecretKey, password: &str, params: KdfParams) -> Result<Self> {
        let public_key = PublicKey::from_point(secret.public_key());

        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let key = params.derive(password, &salt)?;
        let cipher = XChaCha20Poly1305::new(Key::from_slice(key.as_slice()));

        let mut plaintext = Zeroizing::new([0u8; SECRET_LEN]);
        plaintext.copy_from_slice(&secret.to_bytes());
        let aad = public_key.compressed_bytes();
        let ciphertext = cipher
            .encrypt(
                XNonce::from_slice(&nonce),
                Payload {
                    msg: plaintext.as_slice(),
                    aad: &aad,
                },
            )
            .map_err(|e| StoreError::Encryption(e.to_string()));
        drop(plaintext);

        debug!(public_key = %public_key, "encrypted secret key");

        Ok(Self {
            public_key,
            crypto: Crypto {
                cipher: CIPHER.to_string(),
                ciphertext: hex::encode(ciphertext?),
                nonce: hex::encode(nonce),
                kdf: KDF.to_string(),
                kdfparams: StoredKdfParams {
                    params,
                    salt: hex::encode(salt),
                },
            },
            version: FORMAT_VERSION,
        })
    }

    /// Decrypt the secret and check it belongs to the declared public key.
    pub fn decrypt(&self, password: &str) -> Result<k256::SecretKey> {
        if self.crypto.cipher != CIPHER || self.crypto.kdf != KDF {
            return Err(StoreError::Import(format!(
                "unsupported cipher {} / kdf {}",
                self.crypto.cipher, self.crypto.kdf
            ))
            .into());
        }

        let salt = decode_field("salt", &self.crypto.kdfparams.salt)?;
        let nonce = decode_field("nonce", &self.crypto.nonce)?;
        let ciphertext = decode_field("ciphertext", &self.crypto.ciphertext)?;
        if nonce.len() != NONCE_LEN {
            return Err(StoreError::Import(format!("nonce must be {} bytes", NONCE_LEN)).into());
        }

        let key = self.crypto.kdfparams.params.derive(password, &salt)?;
        let cipher = XChaCha20Poly1305::new(Key::from_slice(key.as_slice()));
        let aad = self.public_key.compressed_bytes();
        let plaintext = Zeroizing::new(
            cipher
                .decrypt(
                    XNonce::from_slice(&nonce),
                    Payload {
                        msg: &ciphertext,
                        aad: &aad,
                    },
                )
                .map_err(|_| {
                    StoreError::Decryption(format!(
                        "could not decrypt key {} (wrong password?)",
                        self.public_key
                    ))
                })?,
        );

        if plaintext.len() != SECRET_LEN {
            return Err(StoreError::Import("decrypted secret has wrong length".to_string()).into());
        }
        let secret = k256::SecretKey::from_slice(&plaintext)
            .map_err(|_| StoreError::Import("decrypted secret is not a valid scalar".to_string()))?;

        if PublicKey::from_point(secret.public_key()) != self.public_key {
            return Err(StoreError::Import(format!(
                "secret key does not match declared public key {}",
                self.public_key
            ))
            .into());
        }
        Ok(secret)
    }

    /// Parse a key file from its JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| StoreError::Import(format!("invalid key file: {}", e)).into())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read only the declared public key, without validating the rest.
    pub fn peek_public_key(bytes: &[u8]) -> std::result::Result<String, String> {
        #[derive(Deserialize)]
        struct Header {
            public_key: String,
        }
        serde_json::from_slice::<Header>(bytes)
            .map(|h| h.public_key)
            .map_err(|e| e.to_string())
    }

    /// Write to `path`, failing if anything already exists there.
    pub fn write_new(&self, path: &Path) -> Result<()> {
        let write_err = |source: std::io::Error| FileError::Write {
            path: path.to_path_buf(),
            public_key: self.public_key.to_string(),
            source,
        };
        let contents = self.to_json()?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = match options.open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(FileError::Conflict(path.to_path_buf()).into())
            }
            Err(e) => return Err(write_err(e).into()),
        };
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.write_all(b"\n").map_err(write_err)?;
        file.sync_all().map_err(write_err)?;

        debug!(path = %path.display(), public_key = %self.public_key, "key file written");
        Ok(())
    }
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| StoreError::Import(format!("invalid {}: {}", name, e)).into())
}

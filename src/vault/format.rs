//! Record file format and the process-wide encryption layer.
//!
//! Every account is written to its own file:
//!
//! ```text
//! [CRDV: 4 bytes][version: 1 byte][nonce || AES-256-GCM(account JSON)]
//! ```
//!
//! - **Magic** (`CRDV`): identifies the file as a CredVault record.
//! - **Version**: format version (currently `1`).
//! - **Payload**: the account serialized as JSON, sealed with the
//!   process-wide key.  This layer sits on top of each secret's own
//!   encryption and also covers the identifier, timestamps and version.
//!
//! The process-wide key is key material read from the key file and
//! stretched once with a fixed salt when the codec is built.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::account::Account;
use crate::crypto::keyfile::load_key_file;
use crate::crypto::{open, seal, DerivedKey};
use crate::errors::{CredVaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every record file.
const MAGIC: &[u8; 4] = b"CRDV";

/// Current record format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version).
const PREFIX_LEN: usize = 5;

/// Salt for the process-wide layer.  Fixed so that the same key file
/// always yields the same record key.
const STORAGE_SALT: [u8; 8] = [0x12, 0x34, 0x56, 0x78, 0x90, 0xAB, 0xCD, 0xEF];

// ---------------------------------------------------------------------------
// RecordCodec
// ---------------------------------------------------------------------------

/// Reads and writes encrypted account files.
#[derive(Debug)]
pub struct RecordCodec {
    key: DerivedKey,
}

impl RecordCodec {
    /// Build a codec from process-wide key material.
    pub fn new(key_material: &str) -> Self {
        Self {
            key: DerivedKey::derive(key_material.as_bytes(), &STORAGE_SALT),
        }
    }

    /// Build a codec from the key file at `path`.
    ///
    /// A missing key file is `KeyFileMissing`; callers treat it as fatal.
    pub fn from_key_file(path: &Path) -> Result<Self> {
        let material = load_key_file(path)?;
        Ok(Self::new(&material))
    }

    /// Serialize, encrypt and write `account` into `dir`.
    ///
    /// Creates `dir` if needed.  The file is written to a temp file and
    /// renamed into place, so an existing file is never left half-written.
    /// An existing file holding a different record is never replaced.
    pub fn save(&self, account: &Account, dir: &Path) -> Result<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                CredVaultError::PersistenceFailed(format!(
                    "cannot create directory {}: {e}",
                    dir.display()
                ))
            })?;
            tracing::info!(dir = %dir.display(), "created directory");
        }

        let file_name = account.file_name();
        let path = dir.join(&file_name);

        if path.exists() {
            let held = fs::read(&path)
                .ok()
                .and_then(|data| self.decode(&data).ok());
            if held.as_ref() != Some(account) {
                tracing::warn!(path = %path.display(), "refusing to replace a different record");
                return Err(CredVaultError::PersistenceFailed(format!(
                    "{} already holds another record",
                    path.display()
                )));
            }
        }

        let buf = self.encode(account)?;

        let tmp_path = dir.join(format!(".{file_name}.tmp"));

        fs::write(&tmp_path, &buf)
            .and_then(|()| fs::rename(&tmp_path, &path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp_path);
                CredVaultError::PersistenceFailed(format!(
                    "cannot write {}: {e}",
                    path.display()
                ))
            })?;

        tracing::info!(path = %path.display(), version = account.version(), "saved account");
        Ok(path)
    }

    /// Read `dir/file_name` back into an account.
    ///
    /// Returns `None` (and logs a warning) if the file cannot be read,
    /// decrypted or parsed, so one bad file never blocks the others.
    pub fn load(&self, dir: &Path, file_name: &str) -> Option<Account> {
        let path = dir.join(file_name);

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read account file");
                return None;
            }
        };

        match self.decode(&data) {
            Ok(account) => {
                tracing::debug!(path = %path.display(), "loaded account");
                Some(account)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable account file");
                None
            }
        }
    }

    /// Delete the backing file of `account` in `dir`.
    ///
    /// Returns `Ok(false)` if there was no such file.
    pub fn remove(&self, account: &Account, dir: &Path) -> Result<bool> {
        let path = dir.join(account.file_name());

        if !path.exists() {
            tracing::warn!(path = %path.display(), "account file does not exist");
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| {
            CredVaultError::PersistenceFailed(format!("cannot delete {}: {e}", path.display()))
        })?;

        tracing::info!(path = %path.display(), "deleted account file");
        Ok(true)
    }

    /// Serialize and seal an account into the on-disk byte layout.
    pub fn encode(&self, account: &Account) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(account)
            .map_err(|e| CredVaultError::SerializationError(format!("account: {e}")))?;
        let sealed = seal(&self.key, &json)?;

        let mut buf = Vec::with_capacity(PREFIX_LEN + sealed.len());
        buf.extend_from_slice(MAGIC); // 4 bytes
        buf.push(CURRENT_VERSION); // 1 byte
        buf.extend_from_slice(&sealed);
        Ok(buf)
    }

    /// Inverse of `encode`.
    pub fn decode(&self, data: &[u8]) -> Result<Account> {
        if data.len() < PREFIX_LEN {
            return Err(CredVaultError::SerializationError(
                "file too small to be an account record".into(),
            ));
        }

        if &data[0..4] != MAGIC {
            return Err(CredVaultError::SerializationError(
                "missing CRDV magic bytes".into(),
            ));
        }

        let version = data[4];
        if version != CURRENT_VERSION {
            return Err(CredVaultError::SerializationError(format!(
                "unsupported version {version}, expected {CURRENT_VERSION}"
            )));
        }

        let json = open(&self.key, &data[PREFIX_LEN..]).ok_or(CredVaultError::DecryptionFailed)?;

        let account: Account = serde_json::from_slice(&json)
            .map_err(|e| CredVaultError::SerializationError(format!("account JSON: {e}")))?;

        if account.version() == 0
            || account.name().trim().is_empty()
            || account.identifier().trim().is_empty()
        {
            return Err(CredVaultError::SerializationError(
                "account record has a blank field or version 0".into(),
            ));
        }
        Ok(account)
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

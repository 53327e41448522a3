//! `SecretValue`: a credential's secret, only ever held encrypted.
//!
//! Each value carries its own salt and its own random key material, so
//! two values created from the same plaintext never share ciphertext.
//! Byte fields serialize as base64 strings in JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use super::format::{base64_decode, base64_encode};
use crate::crypto::{self, generate_key_material, generate_salt};
use crate::errors::{CredVaultError, Result};

/// Salt length for a secret value, in bytes.
const SALT_LEN: usize = 8;

/// Size of the per-value key material, in bits.
const KEY_BITS: usize = 256;

/// Shown wherever a secret would otherwise be printed.
pub const MASK: &str = "********";

/// An encrypted secret plus the parameters needed to decrypt it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SecretValue {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    ciphertext: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    salt: Vec<u8>,

    derivation_key: String,
}

impl SecretValue {
    /// Encrypt `plaintext` under a fresh salt and fresh key material.
    pub fn create(plaintext: &str) -> Result<Self> {
        if plaintext.trim().is_empty() {
            return Err(CredVaultError::InvalidParameter(
                "secret must not be blank".into(),
            ));
        }

        let salt = generate_salt(SALT_LEN)?;
        let derivation_key = generate_key_material(KEY_BITS)?;
        let ciphertext = crypto::encrypt(plaintext.as_bytes(), &salt, &derivation_key)?;

        Ok(Self {
            ciphertext,
            salt,
            derivation_key,
        })
    }

    /// Decrypt and return the plaintext.
    ///
    /// The returned string is wiped on drop; keep it only as long as the
    /// caller needs it.
    pub fn reveal(&self) -> Result<Zeroizing<String>> {
        let plaintext = crypto::decrypt(&self.ciphertext, &self.salt, &self.derivation_key)
            .ok_or(CredVaultError::DecryptionFailed)?;

        String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            tracing::warn!("decrypted secret is not valid UTF-8");
            CredVaultError::DecryptionFailed
        })
    }

    /// The encrypted bytes (nonce || ciphertext).
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// The salt this value was encrypted with.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

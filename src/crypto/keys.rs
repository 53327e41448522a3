//! Key material, salts and password-based key derivation.
//!
//! Every encryption in CredVault starts from a *key material* string
//! (random bytes, base64 encoded) that is stretched with
//! PBKDF2-HMAC-SHA256 and a salt into the 256-bit AES key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::TryRngCore;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{CredVaultError, Result};

/// Length of the derived AES key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed PBKDF2 round count applied to every key material string.
pub const KDF_ITERATIONS: u32 = 65_536;

/// Key sizes accepted by `generate_key_material`, in bits.
const SUPPORTED_KEY_BITS: [usize; 3] = [128, 192, 256];

/// Generate `bits` of random key material, returned as base64 text.
///
/// Only AES key sizes (128, 192, 256) are accepted.
pub fn generate_key_material(bits: usize) -> Result<String> {
    if !SUPPORTED_KEY_BITS.contains(&bits) {
        return Err(CredVaultError::InvalidParameter(format!(
            "key size must be one of 128, 192 or 256 bits (got {bits})"
        )));
    }

    let mut raw = Zeroizing::new(vec![0u8; bits / 8]);
    fill_random(&mut raw)?;
    Ok(BASE64.encode(raw.as_slice()))
}

/// Generate `length` cryptographically random salt bytes.
pub fn generate_salt(length: usize) -> Result<Vec<u8>> {
    if length == 0 {
        return Err(CredVaultError::InvalidParameter(
            "salt length must be positive".into(),
        ));
    }

    let mut salt = vec![0u8; length];
    fill_random(&mut salt)?;
    Ok(salt)
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    rand::rngs::OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CredVaultError::EncryptionFailed(format!("OS random source failed: {e}")))
}

/// A 256-bit AES key derived from key material + salt.
///
/// The bytes are wiped when the value is dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Stretch `key_material` with PBKDF2-HMAC-SHA256 over `salt`.
    ///
    /// The same material + salt always produce the same key.
    pub fn derive(key_material: &[u8], salt: &[u8]) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        pbkdf2::pbkdf2_hmac::<Sha256>(key_material, salt, KDF_ITERATIONS, &mut bytes);
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the AES cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(********)")
    }
}

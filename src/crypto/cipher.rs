//! The cipher service: password-based AES-256-GCM.
//!
//! `encrypt` / `decrypt` take a key material string and a salt, stretch
//! them into an AES key with PBKDF2 (see `keys::DerivedKey`), and run
//! AES-256-GCM.  `seal` / `open` do the same with an already derived key,
//! so callers that reuse one key (the record codec) pay for the KDF once.
//!
//! Layout of every ciphertext buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::keys::DerivedKey;
use crate::errors::{CredVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key_material` stretched with `salt`.
pub fn encrypt(plaintext: &[u8], salt: &[u8], key_material: &str) -> Result<Vec<u8>> {
    let key = DerivedKey::derive(key_material.as_bytes(), salt);
    seal(&key, plaintext)
}

/// Decrypt data produced by `encrypt` with the same salt and key material.
///
/// Returns `None` on any failure: wrong key, wrong salt, tampered or
/// truncated bytes.
pub fn decrypt(ciphertext: &[u8], salt: &[u8], key_material: &str) -> Option<Vec<u8>> {
    let key = DerivedKey::derive(key_material.as_bytes(), salt);
    open(&key, ciphertext)
}

/// Encrypt `plaintext` with an already derived key.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CredVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CredVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `seal` with the same key.
pub fn open(key: &DerivedKey, ciphertext_with_nonce: &[u8]) -> Option<Vec<u8>> {
    if ciphertext_with_nonce.len() < NONCE_LEN + TAG_LEN {
        return None;
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).ok()?;
    cipher.decrypt(nonce, ciphertext).ok()
}

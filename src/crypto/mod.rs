//! Cryptographic primitives for CredVault.
//!
//! This module provides:
//! - PBKDF2 + AES-256-GCM encryption and decryption (`cipher`)
//! - Random key material, salts and the zeroizing derived key (`keys`)
//! - The process-wide key file used for records at rest (`keyfile`)

pub mod cipher;
pub mod keyfile;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, generate_salt, ...};
pub use cipher::{decrypt, encrypt, open, seal};
pub use keyfile::{generate_key_file, load_key_file};
pub use keys::{generate_key_material, generate_salt, DerivedKey, KDF_ITERATIONS};

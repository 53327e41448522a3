//! Vault module: encrypted account storage.
//!
//! This module provides:
//! - `SecretValue`, the encrypted secret of an account (`secret`)
//! - `Account` records and their edits (`account`)
//! - The encrypted record file format (`format`)
//! - Ordered in-memory stores for active and archived accounts (`store`)
//! - `CredentialVault`, which keeps files and stores in step (`lifecycle`)

pub mod account;
pub mod format;
pub mod lifecycle;
pub mod secret;
pub mod store;

// Re-export the most commonly used items.
pub use account::{Account, AccountEdit};
pub use format::RecordCodec;
pub use lifecycle::CredentialVault;
pub use secret::SecretValue;
pub use store::{AccountStore, StoreKind};

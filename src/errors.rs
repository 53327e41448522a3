use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum CredVaultError {
    // --- Input errors ---
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Account '{0}' is not in the active store")]
    AccountNotActive(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    // --- Persistence errors ---
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Key file errors ---
    #[error("Encryption key file not found at {0} (run `credvault init`)")]
    KeyFileMissing(PathBuf),

    #[error("Key file error: {0}")]
    KeyFileError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, CredVaultError>;

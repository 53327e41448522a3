use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};

/// Store configuration, loaded from `credvault.toml`.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.  Relative paths resolve against the
/// root directory passed on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding active account files.
    #[serde(default = "default_accounts_dir")]
    pub accounts_dir: String,

    /// Directory holding archived (superseded) account files.
    #[serde(default = "default_archived_dir")]
    pub archived_dir: String,

    /// Text file with the process-wide encryption key material.
    #[serde(default = "default_key_file")]
    pub key_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_accounts_dir() -> String {
    "accounts".to_string()
}

fn default_archived_dir() -> String {
    "archived".to_string()
}

fn default_key_file() -> String {
    "config/encflekey.txt".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            accounts_dir: default_accounts_dir(),
            archived_dir: default_archived_dir(),
            key_file: default_key_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the root directory.
    const FILE_NAME: &'static str = "credvault.toml";

    /// Load settings from `<root>/credvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Active store directory, e.g. `root/accounts`.
    pub fn accounts_path(&self, root: &Path) -> PathBuf {
        root.join(&self.accounts_dir)
    }

    /// Archived store directory, e.g. `root/archived`.
    pub fn archived_path(&self, root: &Path) -> PathBuf {
        root.join(&self.archived_dir)
    }

    /// Key file path, e.g. `root/config/encflekey.txt`.
    pub fn key_file_path(&self, root: &Path) -> PathBuf {
        root.join(&self.key_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

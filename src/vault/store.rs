//! In-memory account stores backed by a directory of record files.
//!
//! There are two stores per vault: `Active` (current accounts) and
//! `Archived` (versions superseded by an edit).  Both keep their accounts
//! ordered by `(created_at, version)` so that "position N" stays stable
//! across repeated listings in one session.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::account::Account;
use super::format::RecordCodec;

/// Which lifecycle stage a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Active,
    Archived,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Active => f.write_str("active"),
            StoreKind::Archived => f.write_str("archived"),
        }
    }
}

/// An ordered, de-duplicated set of accounts for one lifecycle stage.
///
/// Mutations only touch memory; writing files is the caller's job
/// (see `CredentialVault`).
pub struct AccountStore {
    kind: StoreKind,
    dir: PathBuf,
    accounts: BTreeSet<Account>,
}

impl AccountStore {
    /// An empty store for `dir`, without reading the directory.
    pub fn new(kind: StoreKind, dir: &Path) -> Self {
        Self {
            kind,
            dir: dir.to_path_buf(),
            accounts: BTreeSet::new(),
        }
    }

    /// Load every record file in `dir` into a new store.
    ///
    /// Files that cannot be read or decrypted are skipped.  A missing
    /// directory yields an empty store.
    pub fn open(kind: StoreKind, dir: &Path, codec: &RecordCodec) -> Self {
        let mut store = Self::new(kind, dir);

        for file_name in list_record_files(dir) {
            if let Some(account) = codec.load(dir, &file_name) {
                store.accounts.insert(account);
            }
        }

        tracing::debug!(
            store = %kind,
            dir = %dir.display(),
            count = store.accounts.len(),
            "store initialized"
        );
        store
    }

    /// Insert `account`.  Returns `false` if an equal account was
    /// already present.
    pub fn add(&mut self, account: Account) -> bool {
        self.accounts.insert(account)
    }

    /// Remove the account equal to `account`.  Returns `false` if none.
    pub fn delete(&mut self, account: &Account) -> bool {
        self.accounts.remove(account)
    }

    /// The account at 0-based `index`, or `None` if out of range.
    pub fn get_by_position(&self, index: usize) -> Option<&Account> {
        self.accounts.iter().nth(index)
    }

    /// `true` if an account equal to `account` is stored.
    pub fn contains(&self, account: &Account) -> bool {
        self.accounts.contains(account)
    }

    /// `true` if a stored account would be written to `file_name`.
    pub fn holds_file(&self, file_name: &str) -> bool {
        self.accounts.iter().any(|a| a.file_name() == file_name)
    }

    pub fn has_any(&self) -> bool {
        !self.accounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts in position order.
    pub fn list(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Directory holding this store's record files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Names of the regular, non-hidden files in `dir`.
fn list_record_files(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot list account directory");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect();

    names.sort();
    names
}

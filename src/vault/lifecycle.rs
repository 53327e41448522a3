//! `CredentialVault`: create, update and delete across the two stores.
//!
//! Every operation writes files before it changes memory, and an update
//! stores and archives the new state before the old active file is
//! removed.  A crash part-way through can leave a stale extra file
//! behind but never loses the latest version.

use std::path::Path;

use chrono::Utc;
use zeroize::Zeroizing;

use super::account::{Account, AccountEdit};
use super::format::RecordCodec;
use super::store::{AccountStore, StoreKind};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};

/// The credential store: one codec plus the active and archived stores.
pub struct CredentialVault {
    codec: RecordCodec,
    active: AccountStore,
    archived: AccountStore,
}

impl CredentialVault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault rooted at `root` using `settings`.
    ///
    /// Reads the key file (fatal if missing) and loads both stores.
    pub fn open(root: &Path, settings: &Settings) -> Result<Self> {
        let codec = RecordCodec::from_key_file(&settings.key_file_path(root))?;
        Ok(Self::with_codec(
            codec,
            &settings.accounts_path(root),
            &settings.archived_path(root),
        ))
    }

    /// Build a vault from an existing codec and explicit directories.
    pub fn with_codec(codec: RecordCodec, active_dir: &Path, archived_dir: &Path) -> Self {
        let active = AccountStore::open(StoreKind::Active, active_dir, &codec);
        let archived = AccountStore::open(StoreKind::Archived, archived_dir, &codec);
        Self {
            codec,
            active,
            archived,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle operations
    // ------------------------------------------------------------------

    /// Create version 1 of a new account and store it as active.
    pub fn create(&mut self, name: &str, identifier: &str, secret_plain: &str) -> Result<Account> {
        let account = Account::new(name, identifier, secret_plain)?;
        ensure_free(&self.active, &account)?;

        self.codec.save(&account, self.active.dir())?;
        self.active.add(account.clone());

        tracing::info!(name = account.name(), "account created");
        Ok(account)
    }

    /// Apply `edit` to an active account.
    ///
    /// The new version replaces `original` in the active store and
    /// `original`, stamped with the update time, moves to the archive.
    pub fn update(&mut self, original: &Account, edit: AccountEdit) -> Result<Account> {
        self.ensure_active(original)?;

        let now = Utc::now();
        let next = original.next_version(edit, now)?;
        let archived = original.superseded(now);
        ensure_free(&self.active, &next)?;
        ensure_free(&self.archived, &archived)?;

        self.codec.save(&next, self.active.dir())?;
        self.active.add(next.clone());

        self.codec.save(&archived, self.archived.dir())?;
        self.archived.add(archived);

        self.codec.remove(original, self.active.dir())?;
        self.active.delete(original);

        tracing::info!(
            name = next.name(),
            version = next.version(),
            "account updated, previous version archived"
        );
        Ok(next)
    }

    /// Delete an active account and its file.  No archive copy is kept.
    pub fn delete(&mut self, account: &Account) -> Result<()> {
        self.ensure_active(account)?;

        self.codec.remove(account, self.active.dir())?;
        self.active.delete(account);

        tracing::info!(name = account.name(), "account deleted");
        Ok(())
    }

    /// Decrypt the secret of `account`.
    pub fn reveal(account: &Account) -> Result<Zeroizing<String>> {
        account.secret().reveal()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn active(&self) -> &AccountStore {
        &self.active
    }

    pub fn archived(&self) -> &AccountStore {
        &self.archived
    }

    /// The store for `kind`.
    pub fn store(&self, kind: StoreKind) -> &AccountStore {
        match kind {
            StoreKind::Active => &self.active,
            StoreKind::Archived => &self.archived,
        }
    }

    fn ensure_active(&self, account: &Account) -> Result<()> {
        if self.active.contains(account) {
            Ok(())
        } else {
            Err(CredVaultError::AccountNotActive(account.name().to_string()))
        }
    }
}

/// Reject `account` if another record in `store` already owns its file.
fn ensure_free(store: &AccountStore, account: &Account) -> Result<()> {
    if store.holds_file(&account.file_name()) {
        return Err(CredVaultError::InvalidParameter(format!(
            "{} store already has '{}' / '{}' at version {}",
            store.kind(),
            account.name(),
            account.identifier(),
            account.version()
        )));
    }
    Ok(())
}

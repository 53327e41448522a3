//! `Account`: one stored credential record.
//!
//! Accounts are immutable: every edit produces a new value with the
//! version bumped by one.  The storage file name is derived from
//! `(name, identifier, version)`, so each version lands in its own file.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::secret::{SecretValue, MASK};
use crate::errors::{CredVaultError, Result};

/// Suffix of every record file on disk.
pub const FILE_EXTENSION: &str = "ser";

/// A change applied to an account by `CredentialVault::update`.
#[derive(Clone, PartialEq, Eq)]
pub enum AccountEdit {
    /// Replace the login identifier.
    Identifier(String),
    /// Replace the secret with a newly encrypted plaintext.
    Secret(Zeroizing<String>),
}

impl fmt::Debug for AccountEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountEdit::Identifier(identifier) => {
                f.debug_tuple("Identifier").field(identifier).finish()
            }
            AccountEdit::Secret(_) => f.debug_tuple("Secret").field(&MASK).finish(),
        }
    }
}

/// A single credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    name: String,
    identifier: String,
    secret: SecretValue,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    version: u32,
}

impl Account {
    /// Build version 1 of a new account.
    ///
    /// `name` and `identifier` are trimmed and must not be blank.
    pub fn new(name: &str, identifier: &str, secret_plain: &str) -> Result<Self> {
        let name = non_blank("account name", name)?;
        let identifier = non_blank("account identifier", identifier)?;
        let secret = SecretValue::create(secret_plain)?;

        Ok(Self {
            name,
            identifier,
            secret,
            created_at: Utc::now(),
            updated_at: None,
            version: 1,
        })
    }

    /// Produce the next version of this account with `edit` applied.
    ///
    /// `name` and `created_at` carry over; `updated_at` is set to `at`.
    pub fn next_version(&self, edit: AccountEdit, at: DateTime<Utc>) -> Result<Self> {
        let mut next = self.clone();
        match edit {
            AccountEdit::Identifier(identifier) => {
                next.identifier = non_blank("account identifier", &identifier)?;
            }
            AccountEdit::Secret(plain) => {
                next.secret = SecretValue::create(plain.as_str())?;
            }
        }
        next.version = self
            .version
            .checked_add(1)
            .ok_or_else(|| CredVaultError::InvalidParameter("version overflow".into()))?;
        next.updated_at = Some(at);
        Ok(next)
    }

    /// A copy of this account marked as superseded at `at`.
    pub fn superseded(&self, at: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(at),
            ..self.clone()
        }
    }

    /// Storage file name: `sha256hex(name + identifier + version).ser`.
    pub fn file_name(&self) -> String {
        let digest = Sha256::digest(
            format!("{}{}{}", self.name, self.identifier, self.version).as_bytes(),
        );
        format!("{}.{FILE_EXTENSION}", hex::encode(digest))
    }

    /// Position key used by the stores: oldest first, then by version.
    pub fn sort_key(&self) -> (DateTime<Utc>, u32) {
        (self.created_at, self.version)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &SecretValue {
        &self.secret
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

// Ordered by `sort_key`, with the remaining fields as tie-breakers so
// that `Ord` agrees with the structural `Eq`.
impl Ord for Account {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.identifier.cmp(&other.identifier))
            .then_with(|| self.updated_at.cmp(&other.updated_at))
            .then_with(|| self.secret.cmp(&other.secret))
    }
}

impl PartialOrd for Account {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CredVaultError::InvalidParameter(format!(
            "{field} must not be blank"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_starts_at_version_one() {
        let account = Account::new("  Mail ", " user@x.com", "p@ss").unwrap();
        assert_eq!(account.name(), "Mail");
        assert_eq!(account.identifier(), "user@x.com");
        assert_eq!(account.version(), 1);
        assert!(account.updated_at().is_none());
    }

    #[test]
    fn blank_fields_are_rejected() {
        for (name, id, secret) in [("", "id", "pw"), ("name", "  ", "pw"), ("name", "id", " ")] {
            assert!(matches!(
                Account::new(name, id, secret),
                Err(CredVaultError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn next_version_keeps_name_and_creation_time() {
        let original = Account::new("Mail", "user@x.com", "p@ss").unwrap();
        let now = Utc::now();
        let next = original
            .next_version(AccountEdit::Identifier("user2@x.com".into()), now)
            .unwrap();

        assert_eq!(next.name(), original.name());
        assert_eq!(next.created_at(), original.created_at());
        assert_eq!(next.version(), 2);
        assert_eq!(next.identifier(), "user2@x.com");
        assert_eq!(next.updated_at(), Some(now));
        assert_eq!(original.version(), 1);
        assert_eq!(original.identifier(), "user@x.com");
    }

    #[test]
    fn next_version_with_blank_identifier_fails() {
        let original = Account::new("Mail", "user@x.com", "p@ss").unwrap();
        let result = original.next_version(AccountEdit::Identifier(" ".into()), Utc::now());
        assert!(matches!(result, Err(CredVaultError::InvalidParameter(_))));
    }

    #[test]
    fn file_name_is_hex_digest_with_suffix() {
        let account = Account::new("Mail", "user@x.com", "p@ss").unwrap();
        let expected = format!(
            "{}.ser",
            hex::encode(Sha256::digest("Mailuser@x.com1".as_bytes()))
        );
        assert_eq!(account.file_name(), expected);
    }

    #[test]
    fn file_name_changes_with_version() {
        let original = Account::new("Mail", "user@x.com", "p@ss").unwrap();
        let next = original
            .next_version(AccountEdit::Secret(Zeroizing::new("new".into())), Utc::now())
            .unwrap();
        assert_ne!(original.file_name(), next.file_name());
    }

    #[test]
    fn secret_edit_debug_is_masked() {
        let edit = AccountEdit::Secret(Zeroizing::new("hunter2".into()));
        let rendered = format!("{edit:?}");
        assert!(rendered.contains("********"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn debug_output_masks_the_secret() {
        let account = Account::new("Mail", "user@x.com", "hunter2").unwrap();
        let rendered = format!("{account:?}");
        assert!(rendered.contains("********"));
        assert!(!rendered.contains("hunter2"));
    }
}

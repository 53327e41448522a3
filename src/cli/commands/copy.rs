//! `credvault copy`: put an identifier or decrypted secret on the clipboard.

use arboard::Clipboard;

use crate::cli::{open_vault, output, select, Cli};
use crate::errors::{CredVaultError, Result};
use crate::vault::{CredentialVault, StoreKind};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, position: usize, archived: bool, secret: bool) -> Result<()> {
    let vault = open_vault(cli)?;

    let kind = if archived {
        StoreKind::Archived
    } else {
        StoreKind::Active
    };
    let Some(account) = select(&vault, kind, position) else {
        return Ok(());
    };

    let mut clipboard =
        Clipboard::new().map_err(|e| CredVaultError::ClipboardError(e.to_string()))?;

    if secret {
        // The plaintext lives only for the duration of this block.
        let plain = CredentialVault::reveal(account)?;
        clipboard
            .set_text(plain.as_str())
            .map_err(|e| CredVaultError::ClipboardError(e.to_string()))?;
        output::success(&format!("Secret of '{}' copied to clipboard", account.name()));
    } else {
        clipboard
            .set_text(account.identifier())
            .map_err(|e| CredVaultError::ClipboardError(e.to_string()))?;
        output::success(&format!(
            "Identifier of '{}' copied to clipboard",
            account.name()
        ));
    }

    Ok(())
}

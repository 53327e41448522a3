//! `credvault delete`: remove an active account.

use dialoguer::Confirm;

use crate::cli::{open_vault, output, select, Cli};
use crate::errors::{CredVaultError, Result};
use crate::vault::StoreKind;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, position: usize, force: bool) -> Result<()> {
    let mut vault = open_vault(cli)?;

    let Some(account) = select(&vault, StoreKind::Active, position).cloned() else {
        return Ok(());
    };

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete account '{}' ({})? No archive copy is kept.",
                account.name(),
                account.identifier()
            ))
            .default(false)
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.delete(&account)?;
    output::success(&format!("Deleted account '{}'", account.name()));

    Ok(())
}

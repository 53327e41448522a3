//! `credvault update`: edit an account, archiving the previous version.

use crate::cli::{open_vault, output, read_secret, select, Cli};
use crate::errors::Result;
use crate::vault::{AccountEdit, StoreKind};

/// Execute the `update` command.
pub fn execute(cli: &Cli, position: usize, identifier: Option<&str>) -> Result<()> {
    let mut vault = open_vault(cli)?;

    let Some(original) = select(&vault, StoreKind::Active, position).cloned() else {
        return Ok(());
    };

    let edit = match identifier {
        Some(id) => AccountEdit::Identifier(id.to_string()),
        None => {
            let secret = read_secret(&format!("Enter new secret for {}", original.name()))?;
            AccountEdit::Secret(secret)
        }
    };

    let updated = vault.update(&original, edit)?;

    output::success(&format!(
        "Account '{}' updated to version {} (previous version archived)",
        updated.name(),
        updated.version()
    ));

    Ok(())
}

//! `credvault list`: display accounts in a table.

use crate::cli::{open_vault, output, Cli};
use crate::errors::Result;
use crate::vault::StoreKind;

/// Execute the `list` command.
pub fn execute(cli: &Cli, archived: bool) -> Result<()> {
    let vault = open_vault(cli)?;

    let kind = if archived {
        StoreKind::Archived
    } else {
        StoreKind::Active
    };
    let store = vault.store(kind);

    output::info(&format!("{} {kind} account(s)", store.len()));
    output::print_accounts_table(store);

    Ok(())
}

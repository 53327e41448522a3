//! `credvault add`: create a new account.

use crate::cli::{open_vault, output, read_secret, Cli};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, identifier: &str) -> Result<()> {
    let mut vault = open_vault(cli)?;

    let secret = read_secret(&format!("Enter secret for {name}"))?;
    let account = vault.create(name, identifier, &secret)?;

    output::success(&format!(
        "Account '{}' added ({} active)",
        account.name(),
        vault.active().len()
    ));
    output::tip("Run `credvault list` to see all accounts.");

    Ok(())
}

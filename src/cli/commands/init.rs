//! `credvault init`: create the key file and the account directories.

use std::fs;

use crate::cli::{output, Cli};
use crate::config::Settings;
use crate::crypto::generate_key_file;
use crate::errors::Result;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = Settings::load(&cli.root)?;

    // 1. Generate the process-wide key unless one is already there.
    let key_path = settings.key_file_path(&cli.root);
    if key_path.exists() {
        output::info(&format!("Using existing key file at {}", key_path.display()));
    } else {
        generate_key_file(&key_path)?;
        output::success(&format!("Created key file at {}", key_path.display()));
        output::warning("Back up this file: without it no stored account can be read.");
    }

    // 2. Create both store directories.
    for dir in [
        settings.accounts_path(&cli.root),
        settings.archived_path(&cli.root),
    ] {
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            output::info(&format!("Created directory: {}", dir.display()));
        }
    }

    output::tip("Run `credvault add <NAME> <IDENTIFIER>` to add an account.");
    Ok(())
}

//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::vault::{Account, CredentialVault, StoreKind};

/// CredVault CLI: encrypted personal credential store.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Encrypted personal credential store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding credvault.toml, the key file and the account stores
    #[arg(long, env = "CREDVAULT_ROOT", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the encryption key file and the account directories
    Init,

    /// Add an account (secret is prompted or read from stdin)
    Add {
        /// Display name (e.g. "Mail")
        name: String,
        /// Login identifier (e.g. an email address)
        identifier: String,
    },

    /// List accounts in a table
    List {
        /// Show archived versions instead of active accounts
        #[arg(short, long)]
        archived: bool,
    },

    /// Update an account's identifier or secret (the old version is archived)
    Update {
        /// Position shown by `list` (starting at 1)
        position: usize,
        /// New login identifier
        #[arg(short, long, conflicts_with = "secret", required_unless_present = "secret")]
        identifier: Option<String>,
        /// Replace the secret (prompted or read from stdin)
        #[arg(short, long)]
        secret: bool,
    },

    /// Delete an active account (no archive copy is kept)
    Delete {
        /// Position shown by `list` (starting at 1)
        position: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Copy an account's identifier or secret to the clipboard
    Copy {
        /// Position shown by `list` (starting at 1)
        position: usize,
        /// Pick from archived versions instead of active accounts
        #[arg(short, long)]
        archived: bool,
        /// Copy the decrypted secret instead of the identifier
        #[arg(short, long)]
        secret: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings and open both stores for the root given on the CLI.
pub fn open_vault(cli: &Cli) -> Result<CredentialVault> {
    let settings = Settings::load(&cli.root)?;
    CredentialVault::open(&cli.root, &settings)
}

/// Read a secret value, trying in order:
/// 1. Piped stdin (stdin is not a terminal)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the value is wiped from memory on drop.
pub fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        return Ok(buf);
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Resolve a 1-based `position` from `list` to an account in `kind`.
///
/// Returns `None` (after printing a warning) when nothing is there.
pub fn select<'a>(
    vault: &'a CredentialVault,
    kind: StoreKind,
    position: usize,
) -> Option<&'a Account> {
    let store = vault.store(kind);
    if !store.has_any() {
        output::warning(&format!("No {kind} accounts found."));
        return None;
    }

    let found = position
        .checked_sub(1)
        .and_then(|index| store.get_by_position(index));
    if found.is_none() {
        output::warning(&format!(
            "Invalid choice {position}: pick a position between 1 and {}.",
            store.len()
        ));
        tracing::warn!(position, store = %kind, "invalid account selection");
    }
    found
}

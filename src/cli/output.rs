//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::secret::MASK;
use crate::vault::{AccountStore, StoreKind};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a store's accounts as a table, numbered from 1.
///
/// Columns are listed explicitly; the secret is always masked.
pub fn print_accounts_table(store: &AccountStore) {
    if !store.has_any() {
        info(&format!("No {} accounts yet.", store.kind()));
        if store.kind() == StoreKind::Active {
            tip("Run `credvault add <NAME> <IDENTIFIER>` to add your first account.");
        }
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "#",
        "Name",
        "Identifier",
        "Secret",
        "Version",
        "Created",
        "Updated",
    ]);

    for (position, account) in store.list().enumerate() {
        table.add_row(vec![
            (position + 1).to_string(),
            account.name().to_string(),
            account.identifier().to_string(),
            MASK.to_string(),
            account.version().to_string(),
            account.created_at().format(TIME_FORMAT).to_string(),
            account
                .updated_at()
                .map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!("{table}");
}

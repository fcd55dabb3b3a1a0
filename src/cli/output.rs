//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::time::Instant;

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::api::{User, VaultItem};
use crate::notify::{Notice, Notifier};
use crate::vault::{CopyTracker, RevealCache};

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

/// Links without a scheme are shown as https.
pub fn display_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Print the vault items with masked (or revealed) passwords.
///
/// The first column is the 1-based position commands accept in place
/// of an id. An item copied within the last few seconds gets a check mark.
pub fn print_items_table(
    items: &[VaultItem],
    reveals: &RevealCache,
    copies: &CopyTracker,
    now: Instant,
) {
    if items.is_empty() {
        info("No entries found.");
        tip("Use `add` to create your first account.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Account", "Login", "Password", "URL", "Created", "ID"]);

    for (idx, item) in items.iter().enumerate() {
        let mut secret = reveals.display(item.id).to_string();
        if copies.is_copied(item.id, now) {
            secret.push_str(" \u{2713} copied");
        }

        table.add_row(vec![
            (idx + 1).to_string(),
            item.account_name.clone(),
            item.login.clone().unwrap_or_else(|| "N/A".to_string()),
            secret,
            item.url.as_deref().map(display_url).unwrap_or_default(),
            item.created_at.format("%Y-%m-%d %H:%M").to_string(),
            item.id.to_string(),
        ]);
    }

    println!("{table}");
}

/// Print the authenticated user.
pub fn print_user(user: &User) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Username", "User ID", "Member since"]);
    table.add_row(vec![
        user.username.clone(),
        user.id.to_string(),
        user.created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    ]);
    println!("{table}");
}

/// Prints notices to the terminal.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::FieldError { field, message } => error(&format!("{field}: {message}")),
            Notice::Alert(message) => error(&message),
            Notice::Logged(message) => tracing::warn!("{message}"),
        }
    }
}

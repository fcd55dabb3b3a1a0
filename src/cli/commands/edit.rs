//! `passwordy edit` — change an item's fields, optionally its password.

use crate::cli::commands::load_items;
use crate::cli::form::{fill_edit, ItemFields};
use crate::cli::output;
use crate::cli::{connect, load_settings, sign_in, Cli};
use crate::errors::{PasswordyError, Result};

/// Execute the `edit` command.
pub fn execute(cli: &Cli, needle: &str, fields: &ItemFields, change_password: bool) -> Result<()> {
    let settings = load_settings(cli)?;
    let api = connect(&settings);
    let _session = sign_in(cli, &settings, &api)?;

    let mut list = load_items(&api, "")?;
    let id = list.resolve(needle)?.id;

    list.open_edit(id)?;
    let draft = list.draft_mut().ok_or(PasswordyError::NoOpenDraft)?;
    fill_edit(draft, fields, change_password, settings.password_length)?;
    let password_changed = draft.password.as_ref().is_some_and(|p| !p.is_empty());

    let saved = list.submit(&api)?;

    output::success(&format!("Updated '{}'", saved.account_name));
    if !password_changed {
        output::tip("Password unchanged.");
    }
    Ok(())
}

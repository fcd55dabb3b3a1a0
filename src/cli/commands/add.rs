//! `passwordy add` — create a vault item.
//!
//! Usage:
//!   passwordy add                                  (prompts for every field)
//!   passwordy add -a GitHub -l octocat --generate
//!   echo "s3cret" | passwordy add -a Bank -l me

use crate::cli::form::{fill_new, ItemFields};
use crate::cli::output;
use crate::cli::{connect, load_settings, sign_in, Cli};
use crate::errors::{PasswordyError, Result};
use crate::vault::ItemList;

/// Execute the `add` command.
pub fn execute(cli: &Cli, fields: &ItemFields) -> Result<()> {
    let settings = load_settings(cli)?;
    let api = connect(&settings);
    let _session = sign_in(cli, &settings, &api)?;

    let mut list = ItemList::new();
    list.open_create();
    let draft = list.draft_mut().ok_or(PasswordyError::NoOpenDraft)?;
    fill_new(draft, fields, settings.password_length)?;
    let generated = fields.generate;

    let saved = list.submit(&api)?;

    output::success(&format!("Added '{}'", saved.account_name));
    if generated {
        output::tip(&format!(
            "A password was generated; use `passwordy reveal {}` to see it.",
            saved.id
        ));
    }
    Ok(())
}

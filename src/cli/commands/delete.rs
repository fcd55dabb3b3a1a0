//! `passwordy delete` — remove an item from the vault.

use dialoguer::Confirm;

use crate::cli::commands::load_items;
use crate::cli::output;
use crate::cli::{connect, load_settings, sign_in, Cli};
use crate::errors::{PasswordyError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, needle: &str, force: bool) -> Result<()> {
    let settings = load_settings(cli)?;
    let api = connect(&settings);
    let _session = sign_in(cli, &settings, &api)?;

    let mut list = load_items(&api, "")?;
    let id = list.resolve(needle)?.id;
    let name = list.open_delete(id)?.account_name.clone();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| PasswordyError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            list.cancel();
            output::info("Cancelled.");
            return Ok(());
        }
    }

    list.confirm_delete(&api)?;
    output::success(&format!("Deleted '{name}'"));
    Ok(())
}

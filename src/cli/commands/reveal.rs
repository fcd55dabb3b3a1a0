//! `passwordy reveal` — print one item's password.

use crate::cli::commands::load_items;
use crate::cli::{connect, load_settings, sign_in, Cli};
use crate::errors::{PasswordyError, Result};
use crate::vault::RevealCache;

/// Execute the `reveal` command.
///
/// Only the password goes to stdout so it can be piped.
pub fn execute(cli: &Cli, needle: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let api = connect(&settings);
    let _session = sign_in(cli, &settings, &api)?;

    let list = load_items(&api, "")?;
    let id = list.resolve(needle)?.id;

    let mut cache = RevealCache::new();
    cache.toggle(&api, id)?;
    let password = cache
        .get(id)
        .ok_or_else(|| PasswordyError::ItemNotFound(id.to_string()))?;
    println!("{password}");
    Ok(())
}

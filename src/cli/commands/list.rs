//! `passwordy list` — show vault items with masked passwords.

use std::time::{Duration, Instant};

use crate::cli::commands::load_items;
use crate::cli::output;
use crate::cli::{connect, load_settings, sign_in, Cli};
use crate::errors::Result;
use crate::vault::{CopyTracker, RevealCache};

/// Execute the `list` command.
pub fn execute(cli: &Cli, query: Option<&str>) -> Result<()> {
    let settings = load_settings(cli)?;
    let api = connect(&settings);
    let _session = sign_in(cli, &settings, &api)?;

    let list = load_items(&api, query.unwrap_or_default())?;

    if !list.query().is_empty() {
        output::info(&format!(
            "{} item(s) matching '{}'",
            list.items().len(),
            list.query()
        ));
    }
    output::print_items_table(
        list.items(),
        &RevealCache::new(),
        &CopyTracker::new(Duration::ZERO),
        Instant::now(),
    );
    Ok(())
}

//! `passwordy copy` — put an item's password on the clipboard.

use std::time::Instant;

use crate::cli::commands::load_items;
use crate::cli::output;
use crate::cli::{connect, load_settings, sign_in, Cli};
use crate::clipboard::SystemClipboard;
use crate::errors::Result;
use crate::vault::{copy_secret, CopyTracker, RevealCache};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, needle: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let api = connect(&settings);
    let _session = sign_in(cli, &settings, &api)?;

    let list = load_items(&api, "")?;
    let item = list.resolve(needle)?;

    let mut clipboard = SystemClipboard::new()?;
    let mut tracker = CopyTracker::new(settings.copied_window());
    copy_secret(
        &api,
        &RevealCache::new(),
        &mut tracker,
        &mut clipboard,
        item.id,
        Instant::now(),
    )?;

    output::success(&format!("Copied password for '{}'", item.account_name));

    // X11 clipboards are served by the owning process; linger for the
    // copied window so a paste right away still works.
    #[cfg(target_os = "linux")]
    std::thread::sleep(settings.copied_window());

    Ok(())
}

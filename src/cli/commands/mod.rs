//! One module per subcommand. Each exposes an `execute` entry point.

pub mod add;
pub mod auth;
pub mod completions;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod list;
pub mod login;
pub mod reveal;
pub mod shell;
pub mod status;

use crate::api::{ApiClient, Transport};
use crate::errors::{PasswordyError, Result};
use crate::vault::{FetchOutcome, ItemList};

/// Fetch the full item list so a command can resolve its target.
///
/// Single-shot commands have nothing to fall back on, so a failed fetch
/// is an error here rather than a silently kept list.
pub(crate) fn load_items<T: Transport>(api: &ApiClient<T>, query: &str) -> Result<ItemList> {
    let mut list = ItemList::new();
    match list.fetch(api, query) {
        FetchOutcome::Applied => Ok(list),
        FetchOutcome::Stale | FetchOutcome::Failed => Err(PasswordyError::CommandFailed(
            "could not load vault items (see log with -v)".into(),
        )),
    }
}

//! `passwordy login` — check credentials and show the server's record of us.

use crate::cli::output;
use crate::cli::{connect, load_settings, sign_in, Cli};
use crate::errors::{PasswordyError, Result};

/// Execute the `login` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let api = connect(&settings);

    let session = sign_in(cli, &settings, &api)?;
    let user = session.user().ok_or(PasswordyError::NotAuthenticated)?;

    output::success(&format!("Logged in to {} as {}", settings.server_url, user.username));
    output::print_user(user);
    output::tip("Sessions last for one command; use `passwordy shell` to stay logged in.");
    Ok(())
}

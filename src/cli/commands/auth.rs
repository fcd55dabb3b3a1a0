//! `passwordy auth keyring` — save or remove the account password in the
//! OS keyring.
//!
//! When the keyring feature is not compiled in, this returns an error
//! explaining how to enable it.

use crate::cli::Cli;
use crate::errors::Result;

/// Execute `passwordy auth keyring`.
pub fn execute_keyring(cli: &Cli, delete: bool) -> Result<()> {
    #[cfg(feature = "keyring-store")]
    {
        use crate::cli::output;
        use crate::session::SessionManager;

        let settings = crate::cli::load_settings(cli)?;
        let username = crate::cli::resolve_username(cli, &settings)?;

        if delete {
            crate::keyring::delete_password(&settings.server_url, &username)?;
            output::success("Password removed from OS keyring.");
            return Ok(());
        }

        // The user is setting the password explicitly, so skip the keyring
        // lookup and verify it against the server before storing.
        let password = crate::cli::prompt_password(&settings.server_url, &username, false)?;
        let api = crate::cli::connect(&settings);
        let mut session = SessionManager::new();
        session.login(&api, &username, &password)?;
        if let Err(e) = session.logout(&api) {
            tracing::debug!(error = %e, "logout after verification failed");
        }

        crate::keyring::store_password(&settings.server_url, &username, &password)?;
        output::success("Password saved to OS keyring. Future logins will be automatic.");
        Ok(())
    }

    #[cfg(not(feature = "keyring-store"))]
    {
        let _ = (cli, delete);
        Err(crate::errors::PasswordyError::KeyringError(
            "keyring support not compiled; rebuild with `cargo build --features keyring-store`"
                .into(),
        ))
    }
}

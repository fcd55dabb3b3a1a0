//! OS keyring integration for the account password.
//!
//! Stores and retrieves the login password from the operating system's
//! secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! Entries are keyed by server URL and username, so the same account on
//! two servers gets two entries. All operations fail gracefully: if the
//! keyring is unavailable the error is returned and the caller falls back
//! to a password prompt.

use crate::errors::{PasswordyError, Result};

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "passwordy";

/// Build a keyring entry key from a server URL and username.
fn entry_key(server_url: &str, username: &str) -> String {
    format!("{username}@{server_url}")
}

fn entry(server_url: &str, username: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, &entry_key(server_url, username))
        .map_err(|e| PasswordyError::KeyringError(format!("failed to create keyring entry: {e}")))
}

/// Store the password for `username` on `server_url`.
pub fn store_password(server_url: &str, username: &str, password: &str) -> Result<()> {
    entry(server_url, username)?.set_password(password).map_err(|e| {
        PasswordyError::KeyringError(format!("failed to store password in keyring: {e}"))
    })
}

/// Retrieve the stored password, or `None` if there is none.
pub fn get_password(server_url: &str, username: &str) -> Result<Option<String>> {
    match entry(server_url, username)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(PasswordyError::KeyringError(format!(
            "failed to read from keyring: {e}"
        ))),
    }
}

/// Delete the stored password. A missing entry is not an error.
pub fn delete_password(server_url: &str, username: &str) -> Result<()> {
    match entry(server_url, username)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(PasswordyError::KeyringError(format!(
            "failed to delete from keyring: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_key_includes_server_and_user() {
        assert_eq!(
            entry_key("https://vault.example.com", "admin"),
            "admin@https://vault.example.com"
        );
    }
}

//! `passwordy generate` — print a random password. Works offline.

use crate::cli::{load_settings, Cli};
use crate::errors::{PasswordyError, Result};
use crate::generator::generate_password_with_len;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => load_settings(cli)?.password_length,
    };
    if length == 0 {
        return Err(PasswordyError::CommandFailed(
            "length must be at least 1".into(),
        ));
    }

    let password = generate_password_with_len(length);
    println!("{}", password.as_str());
    Ok(())
}

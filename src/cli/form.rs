//! Filling an `ItemDraft` from flags, prompts, or piped input.
//!
//! When no field flags are given and stdin is a terminal, every field is
//! prompted for. Otherwise only the flags are applied, so scripts never
//! block on a prompt.

use std::io::{self, BufRead, IsTerminal};

use crate::errors::{PasswordyError, Result};
use crate::vault::ItemDraft;

/// Item fields accepted on the command line.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct ItemFields {
    /// Account name (e.g. GitHub)
    #[arg(short, long)]
    pub account: Option<String>,

    /// Login or email
    #[arg(short, long)]
    pub login: Option<String>,

    /// Website URL
    #[arg(long)]
    pub url: Option<String>,

    /// Generate a random password instead of typing one
    #[arg(short, long)]
    pub generate: bool,
}

impl ItemFields {
    fn is_empty(&self) -> bool {
        self.account.is_none() && self.login.is_none() && self.url.is_none()
    }

    /// Copy the given flags into `draft`.
    pub fn apply(&self, draft: &mut ItemDraft) {
        if let Some(account) = &self.account {
            draft.account_name = account.clone();
        }
        if let Some(login) = &self.login {
            draft.login = Some(login.clone());
        }
        if let Some(url) = &self.url {
            draft.url = Some(url.clone());
        }
    }
}

/// Fill a fresh draft for `add`.
pub fn fill_new(draft: &mut ItemDraft, fields: &ItemFields, password_length: usize) -> Result<()> {
    let interactive = io::stdin().is_terminal();

    if interactive && fields.is_empty() {
        prompt_fields(draft)?;
    } else {
        fields.apply(draft);
    }

    if fields.generate {
        draft.generate_password(password_length);
        return Ok(());
    }

    let password = if interactive {
        dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| PasswordyError::CommandFailed(format!("password prompt: {e}")))?
    } else {
        read_piped_line()?
    };
    draft.set_password(&password);
    Ok(())
}

/// Update a draft opened from an existing item for `edit`.
///
/// The password is left untouched unless `change_password` or
/// `fields.generate` is set; a blank new password also keeps the old one.
pub fn fill_edit(
    draft: &mut ItemDraft,
    fields: &ItemFields,
    change_password: bool,
    password_length: usize,
) -> Result<()> {
    let interactive = io::stdin().is_terminal();

    if interactive && fields.is_empty() && !change_password && !fields.generate {
        prompt_fields(draft)?;
    } else {
        fields.apply(draft);
    }

    if fields.generate {
        draft.generate_password(password_length);
    } else if change_password {
        if interactive {
            prompt_password_change(draft)?;
        } else {
            draft.set_password(&read_piped_line()?);
        }
    }
    Ok(())
}

/// Ask for a replacement password. A blank answer keeps the stored one.
pub fn prompt_password_change(draft: &mut ItemDraft) -> Result<()> {
    let password = dialoguer::Password::new()
        .with_prompt("New password (leave blank to keep current)")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PasswordyError::CommandFailed(format!("password prompt: {e}")))?;
    draft.set_password(&password);
    Ok(())
}

/// Prompt for account name, login and URL, pre-filled from the draft.
pub fn prompt_fields(draft: &mut ItemDraft) -> Result<()> {
    draft.account_name = input("Account name", &draft.account_name, false)?;
    draft.login = Some(input(
        "Login / email",
        draft.login.as_deref().unwrap_or_default(),
        true,
    )?);
    draft.url = Some(input(
        "Website URL (optional)",
        draft.url.as_deref().unwrap_or_default(),
        true,
    )?);
    Ok(())
}

fn input(prompt: &str, initial: &str, allow_empty: bool) -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(|e| PasswordyError::CommandFailed(format!("input prompt: {e}")))
}

/// First line of piped stdin, without the trailing newline.
fn read_piped_line() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_overrides_given_flags() {
        let mut draft = ItemDraft::new();
        draft.account_name = "Old".into();
        draft.login = Some("me".into());

        let fields = ItemFields {
            account: Some("New".into()),
            ..ItemFields::default()
        };
        fields.apply(&mut draft);

        assert_eq!(draft.account_name, "New");
        assert_eq!(draft.login.as_deref(), Some("me"));
        assert!(draft.url.is_none());
    }

    #[test]
    fn empty_flag_set() {
        assert!(ItemFields::default().is_empty());
        let fields = ItemFields {
            url: Some("x".into()),
            ..ItemFields::default()
        };
        assert!(!fields.is_empty());
    }
}

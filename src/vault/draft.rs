//! The editable form behind the create/edit dialog.
//!
//! A draft holds plaintext only while the dialog is open; the password
//! field is wiped on drop.

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroizing;

use crate::api::{ItemChanges, NewItem, VaultItem};
use crate::errors::{PasswordyError, Result};
use crate::generator;

/// A partial vault item being created or edited.
#[derive(Clone, Default)]
pub struct ItemDraft {
    /// Present when editing an existing item.
    pub id: Option<Uuid>,
    pub account_name: String,
    pub url: Option<String>,
    pub login: Option<String>,
    /// New plaintext password. Blank on an edit means "keep current".
    pub password: Option<Zeroizing<String>>,
}

impl ItemDraft {
    /// An empty draft for a new item.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft pre-filled from an existing item, with no password.
    pub fn from_item(item: &VaultItem) -> Self {
        Self {
            id: Some(item.id),
            account_name: item.account_name.clone(),
            url: item.url.clone(),
            login: item.login.clone(),
            password: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = Some(Zeroizing::new(password.to_string()));
    }

    /// Fill the password field with a freshly generated one.
    pub fn generate_password(&mut self, len: usize) {
        self.password = Some(generator::generate_password_with_len(len));
    }

    /// Check the fields the server requires.
    pub fn validate(&self) -> Result<()> {
        if self.account_name.trim().is_empty() {
            return Err(PasswordyError::InvalidDraft(
                "account name is required".into(),
            ));
        }
        if !self.is_edit() && self.new_password().is_none() {
            return Err(PasswordyError::InvalidDraft(
                "a password is required for a new item".into(),
            ));
        }
        Ok(())
    }

    /// Body for `POST /vault/`.
    pub fn new_item(&self) -> Result<NewItem<'_>> {
        self.validate()?;
        let password = self.new_password().ok_or_else(|| {
            PasswordyError::InvalidDraft("a password is required for a new item".into())
        })?;
        Ok(NewItem {
            account_name: self.account_name.trim(),
            url: non_blank(self.url.as_deref()),
            login: non_blank(self.login.as_deref()),
            password,
        })
    }

    /// Body for `PUT /vault/{id}`. A blank password is left out so the
    /// server keeps the stored secret.
    pub fn changes(&self) -> Result<ItemChanges<'_>> {
        self.validate()?;
        Ok(ItemChanges {
            account_name: self.account_name.trim(),
            url: non_blank(self.url.as_deref()),
            login: non_blank(self.login.as_deref()),
            password: self.new_password(),
        })
    }

    fn new_password(&self) -> Option<&str> {
        self.password
            .as_deref()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }
}

impl fmt::Debug for ItemDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemDraft")
            .field("id", &self.id)
            .field("account_name", &self.account_name)
            .field("url", &self.url)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

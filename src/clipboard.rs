//! Clipboard access.
//!
//! `SystemClipboard` wraps `arboard`. On X11 the copied text is served
//! by this process, so it stays available only while the clipboard handle
//! is alive (the interactive shell keeps one for its whole session).

use crate::errors::{PasswordyError, Result};

/// Somewhere plaintext can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The operating system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| PasswordyError::Clipboard(format!("clipboard unavailable: {e}")))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| PasswordyError::Clipboard(format!("failed to copy: {e}")))
    }
}

//! Secret disclosure: the reveal toggle, clipboard copy, and the
//! short-lived "copied" marker.
//!
//! Revealed plaintexts are kept in `RevealCache` until the same item is
//! toggled again. There is no expiry; entries live as long as the cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;
use zeroize::Zeroizing;

use crate::api::{ApiClient, Transport};
use crate::clipboard::Clipboard;
use crate::errors::Result;

/// What a masked secret looks like on screen.
pub const MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// Display state of one item after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Revealed,
    Masked,
}

/// Plaintexts the user chose to reveal, keyed by item id.
#[derive(Default)]
pub struct RevealCache {
    entries: HashMap<Uuid, Zeroizing<String>>,
}

impl RevealCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal `id`, or mask it again if it is already revealed.
    ///
    /// Masking never touches the network. On a failed reveal nothing is
    /// cached and the item stays masked.
    pub fn toggle<T: Transport>(&mut self, api: &ApiClient<T>, id: Uuid) -> Result<Visibility> {
        if self.entries.remove(&id).is_some() {
            return Ok(Visibility::Masked);
        }

        let password = api.reveal(id)?;
        self.entries.insert(id, password);
        Ok(Visibility::Revealed)
    }

    pub fn get(&self, id: Uuid) -> Option<&str> {
        self.entries.get(&id).map(|p| p.as_str())
    }

    pub fn is_revealed(&self, id: Uuid) -> bool {
        self.entries.contains_key(&id)
    }

    /// What to show for `id`: the plaintext if revealed, the mask otherwise.
    pub fn display(&self, id: Uuid) -> &str {
        self.get(id).unwrap_or(MASK)
    }

    /// Drop the entry for an item that no longer exists.
    pub fn forget(&mut self, id: Uuid) {
        self.entries.remove(&id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remembers which item was copied last, for a fixed window.
#[derive(Debug, Clone)]
pub struct CopyTracker {
    window: Duration,
    last: Option<(Uuid, Instant)>,
}

impl CopyTracker {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn mark(&mut self, id: Uuid, at: Instant) {
        self.last = Some((id, at));
    }

    /// The item whose "copied" marker is lit at `now`, if any.
    pub fn copied_at(&self, now: Instant) -> Option<Uuid> {
        match self.last {
            Some((id, at)) if now.saturating_duration_since(at) < self.window => Some(id),
            _ => None,
        }
    }

    pub fn is_copied(&self, id: Uuid, now: Instant) -> bool {
        self.copied_at(now) == Some(id)
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Copy the plaintext of `id` to the clipboard.
///
/// Uses the cached plaintext when the item is revealed; otherwise fetches
/// it just for this copy without revealing it on screen. Marks the item
/// as copied at `now`.
pub fn copy_secret<T: Transport, C: Clipboard + ?Sized>(
    api: &ApiClient<T>,
    cache: &RevealCache,
    tracker: &mut CopyTracker,
    clipboard: &mut C,
    id: Uuid,
    now: Instant,
) -> Result<()> {
    match cache.get(id) {
        Some(plain) => clipboard.set_text(plain)?,
        None => {
            let fetched = api.reveal(id)?;
            clipboard.set_text(&fetched)?;
        }
    }

    tracker.mark(id, now);
    Ok(())
}

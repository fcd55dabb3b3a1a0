//! Vault module — the item list and everything the user does with items.
//!
//! This module provides:
//! - `ItemDraft`, the create/edit form (`draft`)
//! - `ItemList` with search, refresh and dialogs (`list`)
//! - `RevealCache`, `CopyTracker` and `copy_secret` (`reveal`)
//! - `Workspace`, all of the above for one session (`workspace`)

pub mod draft;
pub mod list;
pub mod reveal;
pub mod workspace;

// Re-export the most commonly used items.
pub use crate::api::VaultItem;
pub use draft::ItemDraft;
pub use list::{FetchOutcome, FetchTicket, ItemList, Modal};
pub use reveal::{copy_secret, CopyTracker, RevealCache, Visibility, MASK};
pub use workspace::Workspace;

//! The item list: search, refresh, and the create/edit/delete dialogs.
//!
//! The list never patches itself locally after a mutation; it re-fetches
//! from the server so what is shown is always what the server returned.
//!
//! Every fetch is stamped with a ticket. Only the response to the most
//! recently issued ticket is applied, so a slow response to an old search
//! can never overwrite the result of a newer one.

use uuid::Uuid;

use super::draft::ItemDraft;
use crate::api::{ApiClient, Transport, VaultItem};
use crate::errors::{PasswordyError, Result};

/// Stamp for one list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: String,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the list.
    Applied,
    /// A newer fetch was issued meanwhile; the response was dropped.
    Stale,
    /// The request failed; the previous list is kept.
    Failed,
}

/// Which dialog is open.
#[derive(Debug, Clone, Default)]
pub enum Modal {
    #[default]
    Closed,
    Editing(ItemDraft),
    ConfirmDelete(VaultItem),
}

/// The searchable list of vault items and its dialogs.
#[derive(Debug)]
pub struct ItemList {
    items: Vec<VaultItem>,
    query: String,
    loading: bool,
    issued: u64,
    modal: Modal,
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            loading: true,
            issued: 0,
            modal: Modal::Closed,
        }
    }

    pub fn items(&self) -> &[VaultItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// True until the first fetch completes.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Issue a new ticket for `query`. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self, query: &str) -> FetchTicket {
        self.issued += 1;
        self.query = query.to_string();
        FetchTicket {
            seq: self.issued,
            query: self.query.clone(),
        }
    }

    /// Apply (or drop) the result of a fetch started with `begin_fetch`.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<VaultItem>>,
    ) -> FetchOutcome {
        if ticket.seq != self.issued {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued,
                "dropping stale item list response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %ticket.query, "failed to fetch items");
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch items matching `query` and replace the list.
    ///
    /// Failures keep the previous list and are only logged.
    pub fn fetch<T: Transport>(&mut self, api: &ApiClient<T>, query: &str) -> FetchOutcome {
        let ticket = self.begin_fetch(query);
        let result = api.list_items(ticket.query());
        self.complete_fetch(&ticket, result)
    }

    /// Re-run the current search.
    pub fn refresh<T: Transport>(&mut self, api: &ApiClient<T>) -> FetchOutcome {
        let query = self.query.clone();
        self.fetch(api, &query)
    }

    /// Change the search text. Every change triggers a fetch.
    pub fn set_query<T: Transport>(&mut self, api: &ApiClient<T>, query: &str) -> FetchOutcome {
        self.fetch(api, query)
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn find(&self, id: Uuid) -> Option<&VaultItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Find an item by id, by 1-based position in the list, or by a
    /// unique case-insensitive account name.
    pub fn resolve(&self, needle: &str) -> Result<&VaultItem> {
        let needle = needle.trim();

        if let Ok(id) = Uuid::parse_str(needle) {
            return self
                .find(id)
                .ok_or_else(|| PasswordyError::ItemNotFound(needle.to_string()));
        }

        if let Ok(position) = needle.parse::<usize>() {
            if position >= 1 {
                if let Some(item) = self.items.get(position - 1) {
                    return Ok(item);
                }
            }
        }

        let mut matches = self
            .items
            .iter()
            .filter(|item| item.account_name.eq_ignore_ascii_case(needle));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(PasswordyError::AmbiguousItem(needle.to_string())),
            (None, _) => Err(PasswordyError::ItemNotFound(needle.to_string())),
        }
    }

    // ------------------------------------------------------------------
    // Dialogs
    // ------------------------------------------------------------------

    /// Open the editor with an empty draft.
    pub fn open_create(&mut self) {
        self.modal = Modal::Editing(ItemDraft::new());
    }

    /// Open the editor pre-filled from the listed item `id`.
    pub fn open_edit(&mut self, id: Uuid) -> Result<()> {
        let item = self
            .find(id)
            .ok_or_else(|| PasswordyError::ItemNotFound(id.to_string()))?;
        self.modal = Modal::Editing(ItemDraft::from_item(item));
        Ok(())
    }

    /// Ask for confirmation before deleting the listed item `id`.
    pub fn open_delete(&mut self, id: Uuid) -> Result<&VaultItem> {
        let item = self
            .find(id)
            .cloned()
            .ok_or_else(|| PasswordyError::ItemNotFound(id.to_string()))?;
        self.modal = Modal::ConfirmDelete(item);
        match &self.modal {
            Modal::ConfirmDelete(item) => Ok(item),
            _ => Err(PasswordyError::ItemNotFound(id.to_string())),
        }
    }

    /// Close whichever dialog is open, discarding any draft.
    pub fn cancel(&mut self) {
        self.modal = Modal::Closed;
    }

    pub fn draft_mut(&mut self) -> Option<&mut ItemDraft> {
        match &mut self.modal {
            Modal::Editing(draft) => Some(draft),
            _ => None,
        }
    }

    /// Save the open draft: update when it has an id, create otherwise.
    ///
    /// On success the dialog closes and the list is re-fetched. On
    /// failure the dialog stays open with the draft intact.
    pub fn submit<T: Transport>(&mut self, api: &ApiClient<T>) -> Result<VaultItem> {
        let draft = match &self.modal {
            Modal::Editing(draft) => draft,
            _ => return Err(PasswordyError::NoOpenDraft),
        };

        let saved = match draft.id {
            Some(id) => api.update_item(id, &draft.changes()?)?,
            None => api.create_item(&draft.new_item()?)?,
        };

        self.modal = Modal::Closed;
        self.refresh(api);
        Ok(saved)
    }

    /// Delete the item awaiting confirmation.
    ///
    /// On success the dialog closes and the list is re-fetched.
    pub fn confirm_delete<T: Transport>(&mut self, api: &ApiClient<T>) -> Result<Uuid> {
        let id = match &self.modal {
            Modal::ConfirmDelete(item) => item.id,
            _ => return Err(PasswordyError::NoOpenDraft),
        };

        api.delete_item(id)?;

        self.modal = Modal::Closed;
        self.refresh(api);
        Ok(id)
    }
}

//! Everything one signed-in user has on screen.
//!
//! `Workspace` bundles the item list, the revealed passwords and the
//! copied marker so they are dropped together when the session ends.

use std::time::Duration;

use uuid::Uuid;

use super::list::ItemList;
use super::reveal::{CopyTracker, RevealCache};
use crate::api::{ApiClient, Transport};
use crate::errors::Result;
use crate::session::{ExpiryWatch, SessionManager};

pub struct Workspace {
    pub list: ItemList,
    pub reveals: RevealCache,
    pub copies: CopyTracker,
}

impl Workspace {
    pub fn new(copied_window: Duration) -> Self {
        Self {
            list: ItemList::new(),
            reveals: RevealCache::new(),
            copies: CopyTracker::new(copied_window),
        }
    }

    /// Delete the item awaiting confirmation and drop its plaintext.
    pub fn delete<T: Transport>(&mut self, api: &ApiClient<T>) -> Result<Uuid> {
        let id = self.list.confirm_delete(api)?;
        self.reveals.forget(id);
        Ok(id)
    }

    /// Forget every item, revealed password and copied marker.
    pub fn clear(&mut self) {
        self.list = ItemList::new();
        self.reveals.clear();
        self.copies.clear();
    }

    /// Clear the workspace if the session lapsed on the server.
    ///
    /// Returns `true` when it did.
    pub fn drop_if_expired<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        session: &mut SessionManager,
        watch: &ExpiryWatch,
    ) -> bool {
        if !session.revalidate(api, watch) {
            return false;
        }
        self.clear();
        true
    }
}

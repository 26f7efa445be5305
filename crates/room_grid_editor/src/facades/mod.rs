//! Optimistic-update facades
//!
//! Each facade owns one state snapshot published through a
//! [`tokio::sync::watch`] channel. Mutations patch the snapshot first, call the
//! store, and on failure restore the previous values, attach the error and
//! return it to the caller.

mod details;
mod editor;
mod items;
mod list;
mod search;
mod view_models;

#[cfg(test)]
pub(crate) mod test_support;

pub use details::{RoomDetailsFacade, RoomDetailsState};
pub use editor::{RoomEditorFacade, RoomEditorState};
pub use items::{FurnitureItemsFacade, FurnitureItemsState};
pub use list::{RoomsListFacade, RoomsListState};
pub use search::{SearchFacade, SearchState, SEARCH_PAGE_SIZE};
pub use view_models::{
    FurnitureListItem, FurniturePayload, PlacementView, RoomListItem, SearchResultView,
};

use crate::error::ApiError;
use room_grid_core::validation::parse_id;
use tokio::sync::watch;
use uuid::Uuid;

/// Observable state cell shared by the facades
#[derive(Debug)]
pub struct StateChannel<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone + Default> Default for StateChannel<S> {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(S::default());
        Self { tx }
    }
}

impl<S: Clone + Default> StateChannel<S> {
    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Modify in place and notify subscribers
    pub fn patch(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    /// Modify only if `f` returns true; subscribers are notified only then
    pub fn patch_if(&self, f: impl FnOnce(&mut S) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn replace(&self, state: S) {
        self.tx.send_replace(state);
    }

    pub fn reset(&self) {
        self.replace(S::default());
    }
}

/// Parse a room id coming from a route or form
fn room_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_id("roomId", raw).map_err(ApiError::validation)
}

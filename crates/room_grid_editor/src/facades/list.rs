use super::{room_id, RoomListItem, StateChannel};
use crate::error::ApiError;
use crate::store::RoomsApi;
use room_grid_core::{ListRoomsQuery, RoomSort, SortOrder};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomsListState {
    pub rooms: Vec<RoomListItem>,
    pub is_loading: bool,
    pub error: Option<ApiError>,
}

/// Rooms list page state
pub struct RoomsListFacade {
    rooms_api: Arc<dyn RoomsApi>,
    state: StateChannel<RoomsListState>,
}

impl RoomsListFacade {
    pub fn new(rooms_api: Arc<dyn RoomsApi>) -> Self {
        Self {
            rooms_api,
            state: StateChannel::default(),
        }
    }

    pub fn snapshot(&self) -> RoomsListState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoomsListState> {
        self.state.subscribe()
    }

    pub fn reset(&self) {
        self.state.reset();
    }

    /// Fetch rooms newest first. A call made while another is in flight returns
    /// immediately without fetching.
    pub async fn load_rooms(&self) -> Result<(), ApiError> {
        let started = self.state.patch_if(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error = None;
            true
        });
        if !started {
            debug!("Rooms already loading, skipping");
            return Ok(());
        }

        let query = ListRoomsQuery {
            sort: RoomSort::CreatedAt,
            order: SortOrder::Desc,
        };
        match self.rooms_api.list_rooms(query).await {
            Ok(rooms) => {
                debug!("Loaded {} room(s)", rooms.len());
                self.state.patch(|state| {
                    state.rooms = rooms.iter().map(RoomListItem::from).collect();
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(error) => {
                self.state.patch(|state| {
                    state.is_loading = false;
                    state.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }

    /// Remove the room from the list right away; put it back if the store refuses
    pub async fn delete_room(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = match room_id(raw_id) {
            Ok(id) => id,
            Err(error) => {
                self.state.patch(|state| state.error = Some(error.clone()));
                return Err(error);
            }
        };

        let previous = self.state.snapshot().rooms;
        self.state.patch(|state| {
            state.rooms.retain(|room| room.id != id);
            state.error = None;
        });

        if let Err(error) = self.rooms_api.delete_room(id).await {
            warn!("Deleting room {} failed, restoring list: {}", id, error);
            self.state.patch(|state| {
                state.rooms = previous;
                state.error = Some(error.clone());
            });
            return Err(error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facades::test_support::FlakyStore;
    use std::sync::atomic::Ordering;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_load_rooms_newest_first() {
        let store = Arc::new(FlakyStore::new());
        let older = store.seed_room("Older");
        let newer = store.seed_room("Newer");
        let facade = RoomsListFacade::new(store.clone());

        facade.load_rooms().await.unwrap();

        let state = facade.snapshot();
        let ids: Vec<_> = state.rooms.iter().map(|room| room.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_load_is_dropped() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(FlakyStore::with_list_gate(gate.clone()));
        store.seed_room("Hall");
        let facade = RoomsListFacade::new(store.clone());

        let (first, second) = tokio::join!(facade.load_rooms(), async {
            let result = facade.load_rooms().await;
            gate.notify_one();
            result
        });

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(facade.snapshot().rooms.len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_attaches_error() {
        let store = Arc::new(FlakyStore::new());
        store.fail("list_rooms");
        let facade = RoomsListFacade::new(store.clone());

        let err = facade.load_rooms().await.unwrap_err();
        let state = facade.snapshot();
        assert_eq!(state.error, Some(err));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_delete_room_rolls_back() {
        let store = Arc::new(FlakyStore::new());
        let kitchen = store.seed_room("Kitchen");
        store.seed_room("Hall");
        let facade = RoomsListFacade::new(store.clone());
        facade.load_rooms().await.unwrap();
        let before = facade.snapshot().rooms;

        store.fail("delete_room");
        let err = facade
            .delete_room(&kitchen.id.to_string())
            .await
            .unwrap_err();

        let state = facade.snapshot();
        assert_eq!(state.rooms, before);
        assert_eq!(state.error, Some(err));

        store.heal("delete_room");
        facade.delete_room(&kitchen.id.to_string()).await.unwrap();
        assert_eq!(facade.snapshot().rooms.len(), 1);
        assert!(facade.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn test_delete_room_rejects_blank_id() {
        let facade = RoomsListFacade::new(Arc::new(FlakyStore::new()));
        let err = facade.delete_room(" ").await.unwrap_err();
        assert_eq!(err.status, 422);
        assert_eq!(facade.snapshot().error, Some(err));
    }
}

use super::StateChannel;
use crate::error::ApiError;
use crate::store::ItemsApi;
use room_grid_core::validation::{parse_id, validate_create_items, validate_rename_item};
use room_grid_core::{
    CreateItemsRequest, ItemCreateFailure, ItemSummary, ListItemsQuery, RenameItem,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FurnitureItemsState {
    pub furniture_id: Option<Uuid>,
    /// Newest first
    pub items: Vec<ItemSummary>,
    pub is_loading: bool,
    pub is_saving: bool,
    /// Items with a delete in flight
    pub deleting: BTreeSet<Uuid>,
    pub error: Option<ApiError>,
}

/// Items kept in one piece of furniture
pub struct FurnitureItemsFacade {
    items_api: Arc<dyn ItemsApi>,
    state: StateChannel<FurnitureItemsState>,
}

impl FurnitureItemsFacade {
    pub fn new(items_api: Arc<dyn ItemsApi>) -> Self {
        Self {
            items_api,
            state: StateChannel::default(),
        }
    }

    pub fn snapshot(&self) -> FurnitureItemsState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FurnitureItemsState> {
        self.state.subscribe()
    }

    pub fn reset(&self) {
        self.state.reset();
    }

    fn fail(&self, error: ApiError) -> ApiError {
        self.state.patch(|state| state.error = Some(error.clone()));
        error
    }

    fn current_furniture(&self) -> Result<Uuid, ApiError> {
        self.state
            .snapshot()
            .furniture_id
            .ok_or_else(|| ApiError::bad_request("No furniture selected"))
    }

    pub async fn load(&self, raw_id: &str) -> Result<(), ApiError> {
        let furniture_id = match parse_id("furnitureId", raw_id) {
            Ok(id) => id,
            Err(errors) => return Err(self.fail(ApiError::validation(errors))),
        };

        let started = self.state.patch_if(|state| {
            if state.is_loading {
                return false;
            }
            if state.furniture_id != Some(furniture_id) {
                state.items.clear();
                state.deleting.clear();
            }
            state.furniture_id = Some(furniture_id);
            state.is_loading = true;
            state.error = None;
            true
        });
        if !started {
            debug!("Items already loading, skipping");
            return Ok(());
        }

        let result = self
            .items_api
            .list_items(ListItemsQuery::for_furniture(furniture_id))
            .await;
        self.state.patch(|state| {
            state.is_loading = false;
            match &result {
                Ok(items) => state.items = items.clone(),
                Err(error) => state.error = Some(error.clone()),
            }
        });
        result.map(|items| debug!("Loaded {} item(s)", items.len()))
    }

    /// Add several items at once. Created items go to the top of the list;
    /// names the store refused are returned so the form can keep them.
    pub async fn add_items(&self, names: Vec<String>) -> Result<Vec<ItemCreateFailure>, ApiError> {
        let furniture_id = self.current_furniture().map_err(|error| self.fail(error))?;
        let request = CreateItemsRequest::new(names.iter().map(|name| name.trim()));
        validate_create_items(&request).map_err(|errors| self.fail(ApiError::validation(errors)))?;

        self.state.patch(|state| {
            state.is_saving = true;
            state.error = None;
        });
        let result = self.items_api.create_items(furniture_id, request).await;

        self.state.patch(|state| {
            state.is_saving = false;
            match &result {
                Ok(created) => {
                    let mut fresh = created.created.clone();
                    fresh.reverse();
                    fresh.append(&mut state.items);
                    state.items = fresh;
                }
                Err(error) => state.error = Some(error.clone()),
            }
        });

        let result = result?;
        if !result.failed.is_empty() {
            warn!("{} item(s) were not saved", result.failed.len());
        }
        Ok(result.failed)
    }

    /// Rename in place right away; the old name comes back if the store refuses
    pub async fn rename_item(&self, item_id: Uuid, name: &str) -> Result<(), ApiError> {
        let request = RenameItem {
            name: name.trim().to_string(),
        };
        validate_rename_item(&request).map_err(|errors| self.fail(ApiError::validation(errors)))?;

        let previous = self.state.snapshot().items;
        self.state.patch(|state| {
            if let Some(item) = state.items.iter_mut().find(|item| item.id == item_id) {
                item.name = request.name.clone();
            }
            state.error = None;
        });

        match self.items_api.rename_item(item_id, request).await {
            Ok(renamed) => {
                self.state.patch(|state| {
                    if let Some(item) = state.items.iter_mut().find(|item| item.id == item_id) {
                        item.name = renamed.name;
                    }
                });
                Ok(())
            }
            Err(error) => {
                warn!("Renaming item {} failed, restoring: {}", item_id, error);
                self.state.patch(|state| {
                    state.items = previous;
                    state.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }

    /// Remove after the store confirms. An item that is already gone counts
    /// as removed; a second delete for the same item while one is in flight
    /// is ignored.
    pub async fn delete_item(&self, item_id: Uuid) -> Result<(), ApiError> {
        let started = self.state.patch_if(|state| state.deleting.insert(item_id));
        if !started {
            return Ok(());
        }

        let result = match self.items_api.delete_item(item_id).await {
            Err(error) if error.is_not_found() => {
                info!("Item {} was already deleted", item_id);
                Ok(())
            }
            other => other,
        };

        self.state.patch(|state| {
            state.deleting.remove(&item_id);
            match &result {
                Ok(()) => state.items.retain(|item| item.id != item_id),
                Err(error) => state.error = Some(error.clone()),
            }
        });
        result
    }
}

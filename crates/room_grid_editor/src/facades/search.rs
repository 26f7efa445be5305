use super::{SearchResultView, StateChannel};
use crate::error::ApiError;
use crate::store::SearchApi;
use room_grid_core::validation::validate_search_items;
use room_grid_core::{SearchItemsQuery, SearchSort};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Results shown per search
pub const SEARCH_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text in the search box; set to the trimmed query once results arrive
    pub query: String,
    pub results: Vec<SearchResultView>,
    pub is_loading: bool,
    /// False until the first search finished, so an empty result list can be
    /// told apart from "nothing searched yet"
    pub has_searched: bool,
    pub error: Option<ApiError>,
}

/// Item search page state
pub struct SearchFacade {
    search_api: Arc<dyn SearchApi>,
    state: StateChannel<SearchState>,
}

impl SearchFacade {
    pub fn new(search_api: Arc<dyn SearchApi>) -> Self {
        Self {
            search_api,
            state: StateChannel::default(),
        }
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn reset(&self) {
        self.state.reset();
    }

    /// Typing clears a stale error
    pub fn set_query(&self, value: &str) {
        self.state.patch(|state| {
            state.query = value.to_string();
            state.error = None;
        });
    }

    /// Run a relevance search. A blank query fails with a 422 without reaching
    /// the store; earlier results stay visible when a search fails.
    pub async fn search(&self, raw: &str) -> Result<(), ApiError> {
        let query = SearchItemsQuery {
            q: raw.trim().to_string(),
            limit: Some(SEARCH_PAGE_SIZE),
            sort: SearchSort::Relevance,
            ..Default::default()
        };
        if let Err(errors) = validate_search_items(&query) {
            let error = ApiError::validation(errors);
            self.state.patch(|state| state.error = Some(error.clone()));
            return Err(error);
        }

        let started = self.state.patch_if(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error = None;
            true
        });
        if !started {
            debug!("Search already running, skipping");
            return Ok(());
        }

        let q = query.q.clone();
        let result = self.search_api.search_items(query).await;
        self.state.patch(|state| {
            state.is_loading = false;
            state.has_searched = true;
            match &result {
                Ok(hits) => {
                    state.query = q;
                    state.results = hits.iter().map(SearchResultView::from).collect();
                }
                Err(error) => state.error = Some(error.clone()),
            }
        });
        result.map(|hits| debug!("Search found {} item(s)", hits.len()))
    }
}

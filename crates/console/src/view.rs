//! Generic list-view data module.
//!
//! A [`ListView`] owns the state behind one console table: the loaded rows,
//! pagination, the filter inputs and a loading flag. What differs between
//! tables (row type, filters, query shape, endpoint) comes from its
//! [`ViewSpec`].
//!
//! State sits behind a `tokio::sync::RwLock` that is never held across a
//! request, so two `list()` calls may overlap. Every call takes a new
//! generation number and a response is applied only if no newer call has
//! started since.

use std::fmt::Debug;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use qms_client::resource::{MutableResource, Resource};
use qms_client::{ApiError, ManagementApi};
use qms_core::pagination::{PageRequest, PaginationState};
use qms_core::types::DbId;
use qms_models::response::{Ack, Page};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::context::Console;
use crate::notice::Notifier;

// ---------------------------------------------------------------------------
// ViewSpec
// ---------------------------------------------------------------------------

/// What a concrete table plugs into [`ListView`].
pub trait ViewSpec: Send + Sync + 'static {
    type Row: Clone + Debug + Send + Sync + 'static;
    /// Filter inputs; `Default` is the empty filter bar.
    type Filters: Clone + Debug + Default + Send + Sync + 'static;
    type Query: Serialize + Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Plural label used in notices, e.g. `suppliers`.
    const LABEL: &'static str;

    fn build_query(filters: &Self::Filters, page: PageRequest) -> Self::Query;

    /// Whether `list()` should hit the backend at all.
    fn is_ready(_filters: &Self::Filters) -> bool {
        true
    }

    fn fetch(
        api: &ManagementApi,
        query: &Self::Query,
    ) -> impl Future<Output = Result<Page<Self::Row>, ApiError>> + Send;
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ViewState<R, F> {
    /// Advisory; cleared only by the newest request.
    pub is_loading: bool,
    pub data: Vec<R>,
    pub pagination: PaginationState,
    pub filters: F,
}

impl<R, F: Default> Default for ViewState<R, F> {
    fn default() -> Self {
        Self {
            is_loading: false,
            data: Vec::new(),
            pagination: PaginationState::default(),
            filters: F::default(),
        }
    }
}

pub type Snapshot<V> = ViewState<<V as ViewSpec>::Row, <V as ViewSpec>::Filters>;

// ---------------------------------------------------------------------------
// ListView
// ---------------------------------------------------------------------------

pub struct ListView<V: ViewSpec> {
    pub(crate) api: ManagementApi,
    pub(crate) notifier: Notifier,
    state: RwLock<Snapshot<V>>,
    generation: AtomicU64,
}

impl<V: ViewSpec> ListView<V> {
    pub fn new(console: &Console) -> Self {
        Self {
            api: console.api.clone(),
            notifier: console.notifier.clone(),
            state: RwLock::new(ViewState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Load the current page with the current filters.
    ///
    /// On failure an error notice is emitted and the error returned. A
    /// response overtaken by a newer `list()` is dropped and reported as
    /// `Ok(())`.
    pub async fn list(&self) -> Result<(), ApiError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = {
            let mut state = self.state.write().await;
            if !V::is_ready(&state.filters) {
                state.data.clear();
                state.pagination.total = 0;
                state.is_loading = false;
                return Ok(());
            }
            state.is_loading = true;
            V::build_query(&state.filters, state.pagination.request())
        };

        let result = V::fetch(&self.api, &query).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(view = V::LABEL, generation, "Discarding superseded list response");
            return Ok(());
        }
        state.is_loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(view = V::LABEL, rows = page.items.len(), total = page.total, "Listed");
                state.data = page.items;
                state.pagination.total = page.total;
                Ok(())
            }
            Err(e) => {
                drop(state);
                self.notifier
                    .error(format!("Failed to list {}: {}", V::LABEL, e.user_message()));
                Err(e)
            }
        }
    }

    /// Filters back to defaults and the first page. Does not fetch.
    pub async fn reset_filters(&self) {
        let mut state = self.state.write().await;
        state.filters = V::Filters::default();
        state.pagination.page_num = 1;
    }

    /// Edit the filter inputs in place. Does not fetch.
    pub async fn update_filters(&self, edit: impl FnOnce(&mut V::Filters)) {
        let mut state = self.state.write().await;
        edit(&mut state.filters);
    }

    /// Apply `edit`, go back to the first page and fetch.
    pub async fn search(&self, edit: impl FnOnce(&mut V::Filters)) -> Result<(), ApiError> {
        {
            let mut state = self.state.write().await;
            edit(&mut state.filters);
            state.pagination.page_num = 1;
        }
        self.list().await
    }

    /// Select a page; a non-positive size keeps the current one.
    pub async fn set_page(&self, page_num: u32, page_size: i32) {
        let mut state = self.state.write().await;
        state.pagination.page_num = page_num.max(1);
        if page_size > 0 {
            state.pagination.page_size = page_size;
        }
    }

    /// The query the next `list()` would send.
    pub async fn current_query(&self) -> V::Query {
        let state = self.state.read().await;
        V::build_query(&state.filters, state.pagination.request())
    }

    /// The current filters with every record requested.
    pub async fn unpaginated_query(&self) -> V::Query {
        let state = self.state.read().await;
        V::build_query(&state.filters, PageRequest::unpaginated())
    }

    pub async fn snapshot(&self) -> Snapshot<V> {
        self.state.read().await.clone()
    }
}

impl<V> ListView<V>
where
    V: ViewSpec,
    V::Row: MutableResource,
{
    pub async fn create(&self, dto: &<V::Row as MutableResource>::Create) -> Result<Ack, ApiError> {
        let result = self.api.resource::<V::Row>().create(dto).await;
        self.announce(result, "create", "created")
    }

    pub async fn update(&self, dto: &<V::Row as MutableResource>::Update) -> Result<Ack, ApiError> {
        let result = self.api.resource::<V::Row>().update(dto).await;
        self.announce(result, "update", "updated")
    }

    /// Delete every id in one request. Returns `true` on success.
    pub async fn remove(&self, ids: &[DbId]) -> Result<bool, ApiError> {
        let result = self.api.resource::<V::Row>().delete(ids).await;
        self.announce(result, "delete", "deleted").map(|_| true)
    }

    fn announce(&self, result: Result<Ack, ApiError>, verb: &str, past: &str) -> Result<Ack, ApiError> {
        let name = <V::Row as Resource>::NAME;
        match result {
            Ok(ack) => {
                self.notifier.success(format!("{name} {past} successfully"));
                Ok(ack)
            }
            Err(e) => {
                self.notifier.error(format!(
                    "Failed to {verb} {}: {}",
                    name.to_lowercase(),
                    e.user_message()
                ));
                Err(e)
            }
        }
    }
}

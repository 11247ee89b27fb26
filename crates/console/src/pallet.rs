//! Products stored on one pallet, with the traceability export.

use std::sync::atomic::{AtomicU64, Ordering};

use qms_client::{ApiError, ManagementApi};
use qms_core::pagination::PALLET_PRODUCTS_PAGE_SIZE;
use qms_core::types::DbId;
use qms_models::product::Product;
use qms_models::query::ProductQuery;
use tokio::sync::RwLock;

use crate::context::Console;
use crate::export::{export_rows, reports, ExportError, ExportOutcome, ExportSink};
use crate::notice::Notifier;

pub const TRACEABILITY_REPORT: &str = "Traceability";

#[derive(Debug, Clone, Default)]
pub struct PalletProductsState {
    pub pallet_id: Option<DbId>,
    pub is_loading: bool,
    pub products: Vec<Product>,
}

pub struct PalletProducts {
    api: ManagementApi,
    notifier: Notifier,
    state: RwLock<PalletProductsState>,
    generation: AtomicU64,
}

impl PalletProducts {
    pub fn new(console: &Console) -> Self {
        Self {
            api: console.api.clone(),
            notifier: console.notifier.clone(),
            state: RwLock::new(PalletProductsState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Load every product on `pallet_id`. A zero id is ignored.
    ///
    /// A response overtaken by a newer `load()` or a `reset()` is dropped
    /// and leaves the loading flag to the newer call.
    pub async fn load(&self, pallet_id: DbId) -> Result<(), ApiError> {
        if pallet_id == 0 {
            return Ok(());
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.pallet_id = Some(pallet_id);
            state.is_loading = true;
        }

        let query = ProductQuery::on_pallet(pallet_id, PALLET_PRODUCTS_PAGE_SIZE);
        let result = self.api.products().list(&query).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(pallet_id, generation, "Discarding superseded pallet products");
            return Ok(());
        }
        state.is_loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(pallet_id, count = page.items.len(), "Loaded pallet products");
                state.products = page.items;
                Ok(())
            }
            Err(e) => {
                drop(state);
                self.notifier
                    .error(format!("Failed to load products: {}", e.user_message()));
                Err(e)
            }
        }
    }

    pub async fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = PalletProductsState::default();
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// Export the products already loaded; nothing is re-fetched.
    pub async fn export(&self, sink: &dyn ExportSink) -> Result<ExportOutcome, ExportError> {
        let products = self.products().await;
        export_rows(
            &self.notifier,
            TRACEABILITY_REPORT,
            &products,
            reports::traceability,
            sink,
        )
    }
}

//! Option lists for relation selectors (supplier, product model, ...).

use tokio::sync::RwLock;

use qms_core::pagination::{PageRequest, RELATION_PAGE_SIZE};
use qms_models::query::KeywordQuery;

use crate::context::Console;
use crate::views::Listed;

/// The records offered by one relation selector.
///
/// A failed load keeps whatever was loaded before and only emits a notice;
/// the form stays usable.
pub struct RelationOptions<R: Listed> {
    console: Console,
    options: RwLock<Vec<R>>,
}

impl<R: Listed> RelationOptions<R> {
    pub fn new(console: &Console) -> Self {
        Self {
            console: console.clone(),
            options: RwLock::new(Vec::new()),
        }
    }

    /// Fetch up to [`RELATION_PAGE_SIZE`] records, unfiltered, and return them.
    pub async fn load(&self) -> Vec<R> {
        let query = KeywordQuery::unfiltered(PageRequest::capped(RELATION_PAGE_SIZE));
        match self.console.api.resource::<R>().list(&query).await {
            Ok(page) => {
                tracing::debug!(relation = R::PLURAL, count = page.items.len(), "Loaded options");
                let mut options = self.options.write().await;
                *options = page.items;
                options.clone()
            }
            Err(e) => {
                self.console
                    .notifier
                    .error(format!("Failed to load {}: {}", R::PLURAL, e.user_message()));
                self.options.read().await.clone()
            }
        }
    }

    pub async fn options(&self) -> Vec<R> {
        self.options.read().await.clone()
    }
}

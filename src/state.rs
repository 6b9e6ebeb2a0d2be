//! Shared application state for all routes.

use crate::store::CatalogStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new<S: CatalogStore + 'static>(store: S) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

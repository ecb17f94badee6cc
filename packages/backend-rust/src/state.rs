use std::sync::Arc;

use crate::db::WordStore;

/// Shared handler state. The store is optional so the server still boots
/// (and the health endpoint stays reachable) when the database is down;
/// data routes answer 503 until a store is available.
#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<WordStore>>,
}

impl AppState {
    pub fn new(store: Option<Arc<WordStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Option<Arc<WordStore>> {
        self.store.clone()
    }
}

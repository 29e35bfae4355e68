use std::sync::Arc;

use crate::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

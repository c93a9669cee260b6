/// Shared application state
use crate::config::ApiSettings;
use shelf_core::BookStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookStore>,
    pub api: ApiSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>, api: ApiSettings) -> Self {
        Self { store, api }
    }
}

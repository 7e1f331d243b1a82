pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::storage::JsonFileStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonFileStore>,
}

impl AppState {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }
}

use std::sync::Arc;

use crate::database::DataStore;

/// Shared application state handed to every handler and to the green
/// middleware. Production wires a MongoStore; tests wire a MemoryStore.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

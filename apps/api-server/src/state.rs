//! Shared application state.

use stockroom_db::Database;

/// Handed to every request by the router. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

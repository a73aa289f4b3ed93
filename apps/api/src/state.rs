use std::sync::Arc;

use crate::applications::store::ApplicationStore;
use crate::config::Config;
use crate::storage::FileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record persistence. Production wires `PgApplicationStore`; tests swap
    /// in an in-memory implementation.
    pub store: Arc<dyn ApplicationStore>,
    /// Uploaded-document storage, local disk in production.
    pub files: Arc<dyn FileStore>,
    pub config: Config,
}

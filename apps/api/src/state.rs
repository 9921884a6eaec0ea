use std::sync::Arc;

use crate::scholarships::models::Dataset;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated, so handlers read it without locking.
    pub dataset: Arc<Dataset>,
}

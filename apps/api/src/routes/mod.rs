pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scholarships::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/scholarships", post(handlers::handle_find_scholarships))
        .with_state(state)
}

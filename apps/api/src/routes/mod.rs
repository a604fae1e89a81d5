pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/worksheets", post(generation::handle_generate))
        .route(
            "/api/v1/worksheets/:id",
            get(generation::handle_get_worksheet),
        )
        // Export API
        .route(
            "/api/v1/worksheets/:id/layout",
            post(render::handle_layout),
        )
        .route(
            "/api/v1/worksheets/:id/export",
            post(render::handle_export),
        )
        .with_state(state)
}

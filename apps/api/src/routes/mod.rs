pub mod enums;
pub mod health;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::applications::handlers;
use crate::dashboard::handlers::handle_get_dashboard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Applications
        .route(
            "/api/applications",
            get(handlers::handle_list).post(handlers::handle_create),
        )
        .route("/api/applications/trash", get(handlers::handle_list_trash))
        .route(
            "/api/applications/:id",
            get(handlers::handle_get_by_id)
                .put(handlers::handle_update)
                .delete(handlers::handle_hard_delete),
        )
        .route(
            "/api/applications/:id/update-status",
            patch(handlers::handle_update_status),
        )
        .route(
            "/api/applications/:id/delete",
            patch(handlers::handle_soft_delete),
        )
        .route(
            "/api/applications/:id/restore",
            patch(handlers::handle_restore),
        )
        // Dashboard
        .route("/api/dashboard", get(handle_get_dashboard))
        // Enum catalogs
        .merge(enums::enum_routes())
        .with_state(state)
}

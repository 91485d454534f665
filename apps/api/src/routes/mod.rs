pub mod health;
pub mod sessions;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/resume",
            put(sessions::handle_update_resume),
        )
        .route(
            "/api/v1/sessions/:id/counts",
            put(sessions::handle_resize_entries),
        )
        .route(
            "/api/v1/sessions/:id/settings",
            put(sessions::handle_update_settings),
        )
        .route(
            "/api/v1/sessions/:id/summary",
            post(sessions::handle_generate_summary).delete(sessions::handle_clear_summary),
        )
        .route(
            "/api/v1/sessions/:id/cover-letter",
            post(sessions::handle_cover_letter),
        )
        .route("/api/v1/sessions/:id/preview", get(sessions::handle_preview))
        .route(
            "/api/v1/sessions/:id/export/pdf",
            get(sessions::handle_export_pdf),
        )
        .route(
            "/api/v1/sessions/:id/export/txt",
            get(sessions::handle_export_text),
        )
        .route("/api/v1/sessions/:id/ats", get(sessions::handle_ats_score))
        .with_state(state)
}

pub mod document;
pub mod forms;
pub mod health;
pub mod preview;
pub mod steps;
pub mod transfer;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document and forms
        .route("/api/v1/document", get(document::handle_get_document))
        .route(
            "/api/v1/document/sections/:key",
            put(document::handle_replace_section),
        )
        .route("/api/v1/drafts/:step", patch(document::handle_edit_draft))
        .route("/api/v1/forms/bullets", post(forms::handle_edit_bullets))
        .route("/api/v1/forms/skills", put(forms::handle_set_skill_tags))
        // Step navigation
        .route("/api/v1/steps", get(steps::handle_get_steps))
        .route("/api/v1/steps/navigate", post(steps::handle_navigate))
        .route("/api/v1/steps/next", post(steps::handle_next))
        .route("/api/v1/steps/back", post(steps::handle_back))
        .route("/api/v1/steps/skip", post(steps::handle_skip))
        .route("/api/v1/review", get(steps::handle_review))
        // Import / export
        .route("/api/v1/export", get(transfer::handle_export))
        .route("/api/v1/import", post(transfer::handle_import))
        .route("/api/v1/reset", post(transfer::handle_reset))
        // Preview and print
        .route("/api/v1/templates", get(preview::handle_list_templates))
        .route("/api/v1/preview", get(preview::handle_preview))
        .route(
            "/api/v1/print",
            post(preview::handle_print).delete(preview::handle_cancel_print),
        )
        .with_state(state)
}

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::persistence::{export_document, import_document, EXPORT_FILE_NAME};
use crate::routes::document::DocumentResponse;
use crate::routes::steps::NavigationResponse;
use crate::state::{lock, AppState};

/// GET /api/v1/export
/// The whole document as a downloadable JSON file.
pub async fn handle_export(State(state): State<AppState>) -> impl IntoResponse {
    let body = export_document(state.session().store.document());
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    )
}

/// POST /api/v1/import
/// Replaces the document with the uploaded file. Nothing changes if the file
/// does not parse.
pub async fn handle_import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<DocumentResponse>, AppError> {
    let doc = import_document(&body)?;
    state.discard_draft();

    let mut session = state.session();
    session.store.set_document(doc);
    info!("Imported CV document");
    Ok(Json(DocumentResponse {
        document: session.store.document().clone(),
        hydrated: session.store.is_hydrated(),
    }))
}

/// POST /api/v1/reset
/// Back to the default document on the first step; the saved copy is purged.
pub async fn handle_reset(State(state): State<AppState>) -> Json<NavigationResponse> {
    state.discard_draft();
    lock(&state.print).take();

    let mut session = state.session();
    session.store.reset();
    session.navigator.restart();
    Json(NavigationResponse {
        moved: true,
        current: session.navigator.current(),
        statuses: session.navigator.statuses(session.store.document()),
    })
}

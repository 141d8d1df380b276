use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::print::{FileSurface, PrintJob, PrintOutcome, PRINT_FILE_NAME};
use crate::state::{lock, AppState};
use crate::templates::{render_markdown, template_by_id, TemplateDefinition, TEMPLATES};

#[derive(Serialize)]
pub struct TemplatesResponse {
    pub selected: &'static str,
    pub templates: &'static [TemplateDefinition],
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplatesResponse> {
    let selected = template_by_id(&state.session().store.document().settings.template_id).id;
    Json(TemplatesResponse {
        selected,
        templates: &TEMPLATES,
    })
}

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> impl IntoResponse {
    let markdown = render_markdown(state.session().store.document());
    ([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], markdown)
}

/// POST /api/v1/print
/// Schedules a print of the current preview. A newer request replaces a job
/// that has not printed yet.
pub async fn handle_print(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let markdown = render_markdown(state.session().store.document());
    let path = state.config.data_dir.join(PRINT_FILE_NAME);
    let surface = Arc::new(FileSurface::new(path.clone(), markdown));
    let job = PrintJob::start(surface, state.config.print_settle);

    if let Some(previous) = lock(&state.print).replace(job) {
        if previous.is_pending() {
            debug!("Replacing pending print job");
        }
    }

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "scheduled",
            "path": path.display().to_string()
        })),
    )
}

/// DELETE /api/v1/print
/// Reports `cancelled: true` only when the job was stopped before printing.
pub async fn handle_cancel_print(State(state): State<AppState>) -> Json<Value> {
    let job = lock(&state.print).take();
    let outcome = match job {
        Some(job) => {
            job.cancel();
            Some(job.wait().await)
        }
        None => None,
    };
    debug!("Print cancel requested, outcome {outcome:?}");
    Json(json!({ "cancelled": outcome == Some(PrintOutcome::Cancelled) }))
}

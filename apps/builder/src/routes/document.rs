use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cv::{CvDocument, Personal, Section, SectionKey};
use crate::errors::AppError;
use crate::forms::StepDraft;
use crate::state::{lock, AppState};
use crate::steps::{step_section, StepId, StepState};
use crate::validation::{validate_section, ValidationResult};

#[derive(Serialize)]
pub struct DocumentResponse {
    pub document: CvDocument,
    pub hydrated: bool,
}

#[derive(Serialize)]
pub struct SectionResponse {
    pub validation: ValidationResult,
    pub statuses: Vec<StepState>,
}

#[derive(Serialize)]
pub struct DraftResponse {
    pub step: StepId,
    pub validation: ValidationResult,
}

#[derive(Deserialize)]
pub struct SummaryDraft {
    pub summary: String,
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<DocumentResponse> {
    let session = state.session();
    Json(DocumentResponse {
        document: session.store.document().clone(),
        hydrated: session.store.is_hydrated(),
    })
}

/// PUT /api/v1/document/sections/:key
/// Replaces one section immediately. Field errors are returned, not enforced.
pub async fn handle_replace_section(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<SectionResponse>, AppError> {
    let key: SectionKey = key.parse()?;
    let section = Section::from_value(key, body)?;
    let validation = validate_section(&section);

    let (current, statuses) = {
        let mut session = state.session();
        session.store.replace_section(section);
        let doc = session.store.document();
        (doc.section(key), session.navigator.statuses(doc))
    };

    state.sync_draft(&current);

    Ok(Json(SectionResponse { validation, statuses }))
}

/// PATCH /api/v1/drafts/:step
/// Form edit for the open step. Committed after the quiet window.
pub async fn handle_edit_draft(
    State(state): State<AppState>,
    Path(step): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<DraftResponse>, AppError> {
    let step = StepId::parse(&step).ok_or_else(|| AppError::NotFound(format!("Unknown step '{step}'")))?;
    let key = step_section(step)
        .ok_or_else(|| AppError::Validation(format!("Step '{}' has no form", step.as_str())))?;

    let (current, edited) = {
        let session = state.session();
        if session.navigator.current() != step {
            return Err(AppError::Validation(format!("Step '{}' is not open", step.as_str())));
        }
        let current = session.store.document().section(key);
        let edited = match (step, &current) {
            (StepId::Summary, Section::Personal(personal)) => {
                let SummaryDraft { summary } = serde_json::from_value(body)
                    .map_err(|e| AppError::Validation(format!("Malformed summary: {e}")))?;
                Section::Personal(Personal {
                    summary,
                    ..personal.clone()
                })
            }
            _ => Section::from_value(key, body)?,
        };
        (current, edited)
    };

    let mut slot = lock(&state.draft);
    let draft = match slot.take() {
        Some(draft) if draft.step() == step => draft,
        _ => {
            debug!("Opening form for step {}", step.as_str());
            let session = Arc::clone(&state.session);
            StepDraft::new(step, &current, state.config.commit_debounce, move |section| {
                lock(&session).store.replace_section(section);
            })?
        }
    };
    let validation = draft.edit(edited)?;
    *slot = Some(draft);

    Ok(Json(DraftResponse { step, validation }))
}

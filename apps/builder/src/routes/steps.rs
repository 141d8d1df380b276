use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::{lock, AppState, BuilderSession};
use crate::steps::{BuilderStep, StepId, StepProgress, StepState};
use crate::validation::{validate_document, FieldError};

#[derive(Serialize)]
pub struct StepsResponse {
    pub current: StepId,
    pub step: Option<BuilderStep>,
    pub statuses: Vec<StepState>,
    pub progress: StepProgress,
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub step: String,
}

/// Outcome of a navigation request. A refused move is not an error.
#[derive(Serialize)]
pub struct NavigationResponse {
    pub moved: bool,
    pub current: StepId,
    pub statuses: Vec<StepState>,
}

#[derive(Serialize)]
pub struct MissingStep {
    pub id: StepId,
    pub title: &'static str,
    pub required: bool,
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub ready: bool,
    pub missing: Vec<MissingStep>,
    pub issues: Vec<FieldError>,
    pub progress: StepProgress,
}

fn navigation(session: &BuilderSession, moved: bool) -> Json<NavigationResponse> {
    Json(NavigationResponse {
        moved,
        current: session.navigator.current(),
        statuses: session.navigator.statuses(session.store.document()),
    })
}

/// Runs a move and, if the open step changed, drops the old step's form.
fn navigate<F>(state: &AppState, mv: F) -> Json<NavigationResponse>
where
    F: FnOnce(&mut BuilderSession) -> bool,
{
    let (left_step, response) = {
        let mut session = state.session();
        let before = session.navigator.current();
        let moved = mv(&mut *session);
        (moved && session.navigator.current() != before, navigation(&*session, moved))
    };
    if left_step {
        state.discard_draft();
    }
    response
}

/// GET /api/v1/steps
pub async fn handle_get_steps(State(state): State<AppState>) -> Json<StepsResponse> {
    let session = state.session();
    let doc = session.store.document();
    let navigator = &session.navigator;
    Json(StepsResponse {
        current: navigator.current(),
        step: navigator.steps().iter().find(|s| s.id == navigator.current()).copied(),
        statuses: navigator.statuses(doc),
        progress: navigator.progress(doc),
    })
}

/// POST /api/v1/steps/navigate
/// Unknown step ids resolve to the first step.
pub async fn handle_navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Json<NavigationResponse> {
    let target = StepId::from_param(&req.step);
    navigate(&state, |session| {
        let BuilderSession { store, navigator } = session;
        navigator.request(target, store.document())
    })
}

/// POST /api/v1/steps/next
/// Commits the open form first so the step is judged on what was typed.
pub async fn handle_next(State(state): State<AppState>) -> Json<NavigationResponse> {
    let pending = lock(&state.draft).take();
    if let Some(draft) = pending {
        draft.flush().await;
    }
    navigate(&state, |session| {
        let BuilderSession { store, navigator } = session;
        navigator.next(store.document())
    })
}

/// POST /api/v1/steps/skip
pub async fn handle_skip(State(state): State<AppState>) -> Json<NavigationResponse> {
    navigate(&state, |session| {
        let BuilderSession { store, navigator } = session;
        navigator.skip(store.document())
    })
}

/// POST /api/v1/steps/back
pub async fn handle_back(State(state): State<AppState>) -> Json<NavigationResponse> {
    navigate(&state, |session| session.navigator.back())
}

/// GET /api/v1/review
pub async fn handle_review(State(state): State<AppState>) -> Json<ReviewResponse> {
    let session = state.session();
    let doc = session.store.document();
    let progress = session.navigator.progress(doc);
    let missing = session
        .navigator
        .steps()
        .iter()
        .filter(|step| progress.missing.contains(&step.id))
        .map(|step| MissingStep {
            id: step.id,
            title: step.title,
            required: step.required,
        })
        .collect();
    Json(ReviewResponse {
        ready: progress.all_required_complete(),
        missing,
        issues: validate_document(doc).errors,
        progress,
    })
}

// Editor helpers for list fields. Bullet edits are stateless; tag edits write
// the skills section like any other section replace.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cv::bullets::{add_bullet, paste_bullets, remove_bullet};
use crate::cv::skills::skills_from_tags;
use crate::cv::Section;
use crate::routes::document::SectionResponse;
use crate::state::AppState;
use crate::validation::validate_section;

#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BulletEdit {
    Add,
    Remove { index: usize },
    Paste { index: usize, text: String },
}

#[derive(Deserialize)]
pub struct BulletEditRequest {
    pub bullets: Vec<String>,
    pub edit: BulletEdit,
}

#[derive(Serialize)]
pub struct BulletEditResponse {
    pub bullets: Vec<String>,
}

#[derive(Deserialize)]
pub struct SkillTagsRequest {
    pub tags: Vec<String>,
}

/// POST /api/v1/forms/bullets
pub async fn handle_edit_bullets(Json(req): Json<BulletEditRequest>) -> Json<BulletEditResponse> {
    let mut bullets = req.bullets;
    match req.edit {
        BulletEdit::Add => add_bullet(&mut bullets),
        BulletEdit::Remove { index } => remove_bullet(&mut bullets, index),
        BulletEdit::Paste { index, text } => paste_bullets(&mut bullets, index, &text),
    }
    Json(BulletEditResponse { bullets })
}

/// PUT /api/v1/forms/skills
/// Rebuilds the skills list from tag names, keeping ids of known skills.
pub async fn handle_set_skill_tags(
    State(state): State<AppState>,
    Json(req): Json<SkillTagsRequest>,
) -> Json<SectionResponse> {
    let (section, statuses) = {
        let mut session = state.session();
        let skills = skills_from_tags(&session.store.document().skills, &req.tags);
        let section = Section::Skills(skills);
        session.store.replace_section(section.clone());
        let doc = session.store.document();
        (section, session.navigator.statuses(doc))
    };

    state.sync_draft(&section);
    Json(SectionResponse {
        validation: validate_section(&section),
        statuses,
    })
}

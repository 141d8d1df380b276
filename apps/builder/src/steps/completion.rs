use crate::cv::{CvDocument, SectionKey};
use crate::steps::sequence::StepId;
use crate::validation::{
    validate_certifications, validate_education, validate_experience, validate_languages,
    validate_personal, validate_projects, validate_skills, validate_summary, ValidationResult,
};

/// The document section a step edits. Summary lives inside `personal`;
/// review edits nothing.
pub fn step_section(step: StepId) -> Option<SectionKey> {
    match step {
        StepId::Personal | StepId::Summary => Some(SectionKey::Personal),
        StepId::Experience => Some(SectionKey::Experience),
        StepId::Education => Some(SectionKey::Education),
        StepId::Skills => Some(SectionKey::Skills),
        StepId::Languages => Some(SectionKey::Languages),
        StepId::Certifications => Some(SectionKey::Certifications),
        StepId::Projects => Some(SectionKey::Projects),
        StepId::Review => None,
    }
}

/// Runs the form rules for the step's own fields. This is what "Next" checks.
pub fn validate_step(step: StepId, doc: &CvDocument) -> ValidationResult {
    match step {
        StepId::Personal => validate_personal(&doc.personal),
        StepId::Summary => validate_summary(&doc.personal.summary),
        StepId::Experience => validate_experience(&doc.experience),
        StepId::Education => validate_education(&doc.education),
        StepId::Skills => validate_skills(&doc.skills),
        StepId::Languages => validate_languages(&doc.languages),
        StepId::Certifications => validate_certifications(&doc.certifications),
        StepId::Projects => validate_projects(&doc.projects),
        StepId::Review => ValidationResult {
            passed: true,
            errors: Vec::new(),
        },
    }
}

/// Whether a step counts as done for the given document.
///
/// Stricter than `validate_step` for the optional steps: an empty summary or
/// an empty languages, certifications or projects list is never done.
pub fn is_step_complete(step: StepId, doc: &CvDocument) -> bool {
    match step {
        StepId::Summary if doc.personal.summary.is_empty() => false,
        StepId::Languages if doc.languages.is_empty() => false,
        StepId::Certifications if doc.certifications.is_empty() => false,
        StepId::Projects if doc.projects.is_empty() => false,
        _ => validate_step(step, doc).passed,
    }
}

//! Form-to-document commits for an open step.
//!
//! Each open step keeps a `StepDraft`. Edits are validated immediately so the
//! form can annotate fields, and committed to the store after a short quiet
//! window. Validation never blocks the commit. Dropping the draft (leaving the
//! step) cancels a commit that has not fired yet.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;

use crate::cv::{Section, SectionKey};
use crate::debounce::Debouncer;
use crate::steps::{step_section, StepId};
use crate::validation::{validate_personal, validate_section, validate_summary, ValidationResult};

pub const DEFAULT_COMMIT_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Step '{step}' does not edit the {key} section")]
    WrongSection { step: &'static str, key: &'static str },
}

fn fingerprint(section: &Section) -> String {
    section.to_value().to_string()
}

/// Field-level results for one step's form. The personal and summary steps
/// share a section but only check their own fields.
pub fn validate_draft(step: StepId, section: &Section) -> ValidationResult {
    match (step, section) {
        (StepId::Personal, Section::Personal(p)) => validate_personal(p),
        (StepId::Summary, Section::Personal(p)) => validate_summary(&p.summary),
        _ => validate_section(section),
    }
}

pub struct StepDraft {
    step: StepId,
    key: SectionKey,
    last_committed: Arc<Mutex<String>>,
    committer: Debouncer<Section>,
}

impl StepDraft {
    /// `current` is the section as the store holds it when the step opens.
    /// `commit` runs on the runtime once an edit has settled.
    pub fn new<F>(step: StepId, current: &Section, delay: Duration, mut commit: F) -> Result<Self, DraftError>
    where
        F: FnMut(Section) + Send + 'static,
    {
        let key = current.key();
        if step_section(step) != Some(key) {
            return Err(DraftError::WrongSection {
                step: step.as_str(),
                key: key.as_str(),
            });
        }

        let last_committed = Arc::new(Mutex::new(fingerprint(current)));
        let committer = {
            let last_committed = Arc::clone(&last_committed);
            Debouncer::new(delay, move |section: Section| {
                let next = fingerprint(&section);
                let mut last = last_committed.lock().unwrap_or_else(PoisonError::into_inner);
                if *last != next {
                    *last = next;
                    drop(last);
                    commit(section);
                }
            })
        };

        Ok(Self {
            step,
            key,
            last_committed,
            committer,
        })
    }

    pub fn step(&self) -> StepId {
        self.step
    }

    /// Records an edit. Returns the field errors to show next to the form.
    pub fn edit(&self, section: Section) -> Result<ValidationResult, DraftError> {
        if section.key() != self.key {
            return Err(DraftError::WrongSection {
                step: self.step.as_str(),
                key: section.key().as_str(),
            });
        }
        let result = validate_draft(self.step, &section);
        let unchanged = {
            let last = self.last_committed.lock().unwrap_or_else(PoisonError::into_inner);
            *last == fingerprint(&section)
        };
        if unchanged {
            // Edited back to what the store already has.
            self.committer.cancel();
        } else {
            self.committer.schedule(section);
        }
        Ok(result)
    }

    /// The store changed underneath the form (import, another step).
    pub fn sync(&self, current: &Section) {
        self.committer.cancel();
        let mut last = self.last_committed.lock().unwrap_or_else(PoisonError::into_inner);
        *last = fingerprint(current);
    }

    pub async fn flush(&self) {
        self.committer.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::{CvDocument, ItemId, Language, Personal};
    use tokio::time::sleep;

    type Commits = Arc<Mutex<Vec<Section>>>;

    fn draft_for(step: StepId, current: Section) -> (StepDraft, Commits) {
        let commits: Commits = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let commits = Arc::clone(&commits);
            move |section| commits.lock().unwrap().push(section)
        };
        let draft = StepDraft::new(step, &current, DEFAULT_COMMIT_DELAY, sink).unwrap();
        (draft, commits)
    }

    fn personal_named(first: &str) -> Section {
        Section::Personal(Personal {
            first_name: first.to_string(),
            ..Personal::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_commits_once() {
        let (draft, commits) = draft_for(StepId::Personal, personal_named(""));
        for name in ["A", "Ad", "Ada"] {
            draft.edit(personal_named(name)).unwrap();
            sleep(Duration::from_millis(50)).await;
        }
        sleep(Duration::from_millis(300)).await;
        let commits = commits.lock().unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0], personal_named("Ada"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_edit_still_commits_with_errors() {
        let (draft, commits) = draft_for(StepId::Personal, personal_named(""));
        let result = draft.edit(personal_named("Ada")).unwrap();
        assert!(!result.passed);
        assert!(result.errors.iter().any(|e| e.path == "personal.email"));
        sleep(Duration::from_millis(300)).await;
        assert_eq!(commits.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reverting_to_stored_value_commits_nothing() {
        let (draft, commits) = draft_for(StepId::Personal, personal_named("Ada"));
        draft.edit(personal_named("Adx")).unwrap();
        draft.edit(personal_named("Ada")).unwrap();
        sleep(Duration::from_millis(300)).await;
        assert!(commits.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_step_cancels_pending_commit() {
        let (draft, commits) = draft_for(StepId::Personal, personal_named(""));
        draft.edit(personal_named("Ada")).unwrap();
        drop(draft);
        sleep(Duration::from_millis(300)).await;
        assert!(commits.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_summary_step_only_checks_summary() {
        let (draft, _) = draft_for(StepId::Summary, personal_named(""));
        let mut p = Personal::default();
        p.summary = "short".to_string();
        let result = draft.edit(Section::Personal(p)).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "personal.summary");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_section_is_rejected() {
        let doc = CvDocument::default();
        let err = StepDraft::new(
            StepId::Skills,
            &doc.section(SectionKey::Languages),
            DEFAULT_COMMIT_DELAY,
            |_| {},
        );
        assert!(err.is_err());

        let (draft, _) = draft_for(StepId::Languages, Section::Languages(Vec::new()));
        assert!(draft.edit(personal_named("Ada")).is_err());
        let ok = draft.edit(Section::Languages(vec![Language {
            id: ItemId::generate(),
            name: "Dutch".to_string(),
            level: None,
        }]));
        assert!(ok.unwrap().passed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_drops_pending_and_rebases() {
        let (draft, commits) = draft_for(StepId::Personal, personal_named(""));
        draft.edit(personal_named("Ada")).unwrap();
        draft.sync(&personal_named("Grace"));
        draft.edit(personal_named("Grace")).unwrap();
        sleep(Duration::from_millis(300)).await;
        assert!(commits.lock().unwrap().is_empty());
    }
}

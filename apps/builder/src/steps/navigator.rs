use tracing::debug;

use crate::cv::CvDocument;
use crate::steps::completion::validate_step;
use crate::steps::sequence::{index_of, next_step, previous_step, BuilderStep, StepId, BUILDER_STEPS};
use crate::steps::status::{compute_progress, is_reachable, step_statuses, StepProgress, StepState};

/// Tracks the open step and decides which navigation requests to honor.
///
/// Refused requests are not errors: the caller simply stays where it is, and
/// the locked status already tells the user why.
#[derive(Debug, Clone)]
pub struct StepNavigator {
    steps: &'static [BuilderStep],
    current: StepId,
}

impl Default for StepNavigator {
    fn default() -> Self {
        Self::new(&BUILDER_STEPS)
    }
}

impl StepNavigator {
    pub fn new(steps: &'static [BuilderStep]) -> Self {
        let current = steps.first().map(|s| s.id).unwrap_or(StepId::Personal);
        Self { steps, current }
    }

    pub fn current(&self) -> StepId {
        self.current
    }

    pub fn steps(&self) -> &'static [BuilderStep] {
        self.steps
    }

    fn step(&self, id: StepId) -> Option<&BuilderStep> {
        index_of(self.steps, id).map(|i| &self.steps[i])
    }

    /// Opens `target` if the gating rule allows it.
    pub fn request(&mut self, target: StepId, doc: &CvDocument) -> bool {
        if !is_reachable(self.steps, doc, self.current, target) {
            debug!("Refused navigation {:?} -> {:?}: step is gated", self.current, target);
            return false;
        }
        self.current = target;
        true
    }

    /// "Next": the open step's fields must validate and the following step
    /// must be reachable.
    pub fn next(&mut self, doc: &CvDocument) -> bool {
        let Some(target) = next_step(self.steps, self.current) else {
            return false;
        };
        let validation = validate_step(self.current, doc);
        if !validation.passed {
            debug!(
                "Refused next from {:?}: {} field error(s)",
                self.current,
                validation.errors.len()
            );
            return false;
        }
        self.request(target, doc)
    }

    /// "Skip for now": optional steps advance without validating.
    pub fn skip(&mut self, doc: &CvDocument) -> bool {
        let optional = self.step(self.current).is_some_and(|s| !s.required);
        match next_step(self.steps, self.current) {
            Some(target) if optional => self.request(target, doc),
            _ => false,
        }
    }

    pub fn back(&mut self) -> bool {
        match previous_step(self.steps, self.current) {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    /// Returns to the first step, used after a reset.
    pub fn restart(&mut self) {
        if let Some(first) = self.steps.first() {
            self.current = first.id;
        }
    }

    pub fn statuses(&self, doc: &CvDocument) -> Vec<StepState> {
        step_statuses(doc, self.current, self.steps)
    }

    pub fn progress(&self, doc: &CvDocument) -> StepProgress {
        compute_progress(doc, self.current, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::{Experience, ItemId, Skill};

    fn ready_through_skills() -> CvDocument {
        let mut doc = CvDocument::default();
        doc.personal.first_name = "Ada".to_string();
        doc.personal.last_name = "Lovelace".to_string();
        doc.personal.email = "ada@example.com".to_string();
        doc.experience = vec![Experience {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            start_date: "2020".to_string(),
            bullets: vec!["Shipped X feature reducing errors".to_string()],
            ..Experience::blank()
        }];
        doc.education[0].school = "MIT".to_string();
        doc.education[0].degree = "BSc".to_string();
        doc.education[0].start_date = "2012".to_string();
        doc.skills.push(Skill {
            id: ItemId::generate(),
            name: "Rust".to_string(),
            level: None,
        });
        doc
    }

    #[test]
    fn test_starts_on_personal() {
        assert_eq!(StepNavigator::default().current(), StepId::Personal);
    }

    #[test]
    fn test_gated_request_is_silently_refused() {
        let doc = CvDocument::default();
        let mut nav = StepNavigator::default();
        assert!(!nav.request(StepId::Experience, &doc));
        assert_eq!(nav.current(), StepId::Personal);
    }

    #[test]
    fn test_next_requires_valid_step() {
        let mut doc = CvDocument::default();
        let mut nav = StepNavigator::default();
        assert!(!nav.next(&doc));
        doc.personal.first_name = "Ada".to_string();
        doc.personal.last_name = "Lovelace".to_string();
        doc.personal.email = "ada@example.com".to_string();
        assert!(nav.next(&doc));
        assert_eq!(nav.current(), StepId::Summary);
    }

    #[test]
    fn test_skip_only_from_optional_steps() {
        let doc = ready_through_skills();
        let mut nav = StepNavigator::default();
        assert!(!nav.skip(&doc));
        assert!(nav.request(StepId::Summary, &doc));
        assert!(nav.skip(&doc));
        assert_eq!(nav.current(), StepId::Experience);
    }

    #[test]
    fn test_short_summary_blocks_next_but_not_skip() {
        let mut doc = ready_through_skills();
        doc.personal.summary = "too short".to_string();
        let mut nav = StepNavigator::default();
        nav.request(StepId::Summary, &doc);
        assert!(!nav.next(&doc));
        assert!(nav.skip(&doc));
    }

    #[test]
    fn test_walk_to_review_with_optional_steps_skipped() {
        let doc = ready_through_skills();
        let mut nav = StepNavigator::default();
        assert!(nav.request(StepId::Languages, &doc));
        assert!(nav.next(&doc));
        assert!(nav.next(&doc));
        assert!(nav.next(&doc));
        assert_eq!(nav.current(), StepId::Review);
        assert!(!nav.next(&doc));
    }

    #[test]
    fn test_back_and_restart() {
        let doc = ready_through_skills();
        let mut nav = StepNavigator::default();
        assert!(!nav.back());
        nav.request(StepId::Education, &doc);
        assert!(nav.back());
        assert_eq!(nav.current(), StepId::Experience);
        nav.restart();
        assert_eq!(nav.current(), StepId::Personal);
    }

    #[test]
    fn test_statuses_follow_current_step() {
        let doc = ready_through_skills();
        let mut nav = StepNavigator::default();
        nav.request(StepId::Skills, &doc);
        let states = nav.statuses(&doc);
        let active: Vec<_> = states
            .iter()
            .filter(|s| s.status == crate::steps::StepStatus::Active)
            .map(|s| s.id)
            .collect();
        assert_eq!(active, vec![StepId::Skills]);
        assert_eq!(nav.progress(&doc).position, 5);
    }
}

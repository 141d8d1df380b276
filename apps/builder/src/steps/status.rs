//! Gating and status projection for the step navigation.
//!
//! Everything here is a pure function of (document, current step, sequence)
//! and is safe to recompute on every document change.

use serde::Serialize;

use crate::cv::CvDocument;
use crate::steps::completion::is_step_complete;
use crate::steps::sequence::{index_of, BuilderStep, StepId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Active,
    Done,
    Locked,
    Incomplete,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepState {
    pub id: StepId,
    pub title: &'static str,
    pub required: bool,
    pub status: StepStatus,
}

/// True when every required step strictly before `index` is complete.
fn prerequisites_met(steps: &[BuilderStep], completion: &[bool], index: usize) -> bool {
    steps[..index]
        .iter()
        .zip(completion)
        .filter(|(step, _)| step.required)
        .all(|(_, done)| *done)
}

fn completion_of(steps: &[BuilderStep], doc: &CvDocument) -> Vec<bool> {
    steps.iter().map(|step| is_step_complete(step.id, doc)).collect()
}

/// Whether the shell may open `target` while `current` is open.
///
/// The open step is always reachable. Any other step needs every earlier
/// required step complete, whether or not the target itself is required.
/// Steps outside the sequence are never reachable.
pub fn is_reachable(
    steps: &[BuilderStep],
    doc: &CvDocument,
    current: StepId,
    target: StepId,
) -> bool {
    if target == current {
        return true;
    }
    let Some(index) = index_of(steps, target) else {
        return false;
    };
    let completion = completion_of(&steps[..index], doc);
    prerequisites_met(steps, &completion, index)
}

/// Projects one status per step for the navigation UI.
///
/// `active` wins, then `done`; an unfinished required step is `locked` when an
/// earlier required step is unfinished and `incomplete` otherwise. Optional
/// steps are never locked.
pub fn step_statuses(doc: &CvDocument, current: StepId, steps: &[BuilderStep]) -> Vec<StepState> {
    let completion = completion_of(steps, doc);
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let status = if step.id == current {
                StepStatus::Active
            } else if completion[index] {
                StepStatus::Done
            } else if step.required && !prerequisites_met(steps, &completion, index) {
                StepStatus::Locked
            } else {
                StepStatus::Incomplete
            };
            StepState {
                id: step.id,
                title: step.title,
                required: step.required,
                status,
            }
        })
        .collect()
}

/// Progress snapshot shown next to the stepper and on the review step.
#[derive(Debug, Clone, Serialize)]
pub struct StepProgress {
    /// 1-based position of the open step.
    pub position: usize,
    pub total: usize,
    pub completed: usize,
    pub required_completed: usize,
    pub required_total: usize,
    /// Every step other than review that is not complete, in order.
    pub missing: Vec<StepId>,
}

impl StepProgress {
    pub fn all_required_complete(&self) -> bool {
        self.required_completed == self.required_total
    }
}

pub fn compute_progress(doc: &CvDocument, current: StepId, steps: &[BuilderStep]) -> StepProgress {
    let completion = completion_of(steps, doc);
    let position = index_of(steps, current).map(|i| i + 1).unwrap_or(1);
    let required_total = steps.iter().filter(|s| s.required).count();
    let required_completed = steps
        .iter()
        .zip(&completion)
        .filter(|(step, done)| step.required && **done)
        .count();
    let missing = steps
        .iter()
        .zip(&completion)
        .filter(|(step, done)| step.id != StepId::Review && !**done)
        .map(|(step, _)| step.id)
        .collect();

    StepProgress {
        position,
        total: steps.len(),
        completed: completion.iter().filter(|done| **done).count(),
        required_completed,
        required_total,
        missing,
    }
}

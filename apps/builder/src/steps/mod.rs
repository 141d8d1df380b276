// Step engine: the fixed builder sequence, per-step completion, gating and
// the status projection the stepper renders. Pure over the current document.

pub mod completion;
pub mod navigator;
pub mod sequence;
pub mod status;

pub use completion::{is_step_complete, step_section, validate_step};
pub use navigator::StepNavigator;
pub use sequence::{BuilderStep, StepId, BUILDER_STEPS};
pub use status::{compute_progress, is_reachable, step_statuses, StepProgress, StepState, StepStatus};

//! The canonical builder step order.
//!
//! 1. Personal → 2. Summary → 3. Experience → 4. Education → 5. Skills →
//! 6. Languages → 7. Certifications → 8. Projects → 9. Review
//!
//! The order drives both next/back navigation and gating. It is fixed; the
//! `sectionOrder` setting only changes how templates lay sections out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Personal,
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Projects,
    Review,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Personal => "personal",
            StepId::Summary => "summary",
            StepId::Experience => "experience",
            StepId::Education => "education",
            StepId::Skills => "skills",
            StepId::Languages => "languages",
            StepId::Certifications => "certifications",
            StepId::Projects => "projects",
            StepId::Review => "review",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        BUILDER_STEPS
            .iter()
            .map(|step| step.id)
            .find(|id| id.as_str() == value)
    }

    /// Resolves a step id coming from the shell. Unknown ids open the first step.
    pub fn from_param(value: &str) -> Self {
        Self::parse(value).unwrap_or(StepId::Personal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuilderStep {
    pub id: StepId,
    pub title: &'static str,
    pub required: bool,
    pub ats_tip: &'static str,
}

pub const BUILDER_STEPS: [BuilderStep; 9] = [
    BuilderStep {
        id: StepId::Personal,
        title: "Personal Info",
        required: true,
        ats_tip: "Match the name and email you use on applications.",
    },
    BuilderStep {
        id: StepId::Summary,
        title: "Professional Summary",
        required: false,
        ats_tip: "Use 2-3 lines that align with the job posting keywords.",
    },
    BuilderStep {
        id: StepId::Experience,
        title: "Work Experience",
        required: true,
        ats_tip: "Start bullets with strong verbs and add measurable results.",
    },
    BuilderStep {
        id: StepId::Education,
        title: "Education",
        required: true,
        ats_tip: "List the most recent degree first with dates.",
    },
    BuilderStep {
        id: StepId::Skills,
        title: "Skills",
        required: true,
        ats_tip: "Mirror the skills listed in the job description.",
    },
    BuilderStep {
        id: StepId::Languages,
        title: "Languages",
        required: false,
        ats_tip: "Include proficiency levels for clarity.",
    },
    BuilderStep {
        id: StepId::Certifications,
        title: "Certifications",
        required: false,
        ats_tip: "Add only recent or relevant certifications.",
    },
    BuilderStep {
        id: StepId::Projects,
        title: "Projects",
        required: false,
        ats_tip: "Highlight tools and outcomes, not just tasks.",
    },
    BuilderStep {
        id: StepId::Review,
        title: "Review",
        required: false,
        ats_tip: "Aim for a balanced, one-page structure.",
    },
];

/// Position of `id` in `steps`, if present.
pub fn index_of(steps: &[BuilderStep], id: StepId) -> Option<usize> {
    steps.iter().position(|step| step.id == id)
}

pub fn next_step(steps: &[BuilderStep], id: StepId) -> Option<StepId> {
    let idx = index_of(steps, id)?;
    steps.get(idx + 1).map(|step| step.id)
}

pub fn previous_step(steps: &[BuilderStep], id: StepId) -> Option<StepId> {
    let idx = index_of(steps, id)?;
    idx.checked_sub(1).map(|prev| steps[prev].id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_has_nine_steps_ending_in_review() {
        assert_eq!(BUILDER_STEPS.len(), 9);
        assert_eq!(BUILDER_STEPS[0].id, StepId::Personal);
        assert_eq!(BUILDER_STEPS[8].id, StepId::Review);
    }

    #[test]
    fn test_required_steps() {
        let required: Vec<_> = BUILDER_STEPS
            .iter()
            .filter(|s| s.required)
            .map(|s| s.id)
            .collect();
        assert_eq!(
            required,
            vec![StepId::Personal, StepId::Experience, StepId::Education, StepId::Skills]
        );
    }

    #[test]
    fn test_next_and_previous() {
        assert_eq!(next_step(&BUILDER_STEPS, StepId::Personal), Some(StepId::Summary));
        assert_eq!(next_step(&BUILDER_STEPS, StepId::Review), None);
        assert_eq!(previous_step(&BUILDER_STEPS, StepId::Summary), Some(StepId::Personal));
        assert_eq!(previous_step(&BUILDER_STEPS, StepId::Personal), None);
    }

    #[test]
    fn test_from_param_falls_back_to_personal() {
        assert_eq!(StepId::from_param("skills"), StepId::Skills);
        assert_eq!(StepId::from_param("nope"), StepId::Personal);
        assert_eq!(StepId::from_param(""), StepId::Personal);
    }
}

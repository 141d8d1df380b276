//! Field-level rules for every CV section.
//!
//! This is the only place the rules live: the step forms use the results to
//! annotate fields and gate "Next", and the completion engine in `steps` uses
//! the same results to decide whether a step is done.

mod email;

pub use email::is_valid_email;

use serde::{Deserialize, Serialize};

use crate::cv::{
    Certification, CvDocument, Education, Experience, Language, Personal, Project, Section,
    Settings, Skill,
};

pub const SUMMARY_MIN_CHARS: usize = 30;
pub const BULLET_MIN_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `experience.0.bullets.1`.
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn push(&mut self, path: impl Into<String>, message: &str) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.to_string(),
        });
    }

    fn require(&mut self, value: &str, path: impl Into<String>, message: &str) {
        if value.is_empty() {
            self.push(path, message);
        }
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::from_errors(self.errors)
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_bullets(c: &mut Collector, prefix: &str, bullets: &[String]) {
    if bullets.is_empty() {
        c.push(format!("{prefix}.bullets"), "Add at least one bullet");
        return;
    }
    for (i, bullet) in bullets.iter().enumerate() {
        if char_len(bullet) < BULLET_MIN_CHARS {
            c.push(format!("{prefix}.bullets.{i}"), "Bullet is too short");
        }
    }
}

pub fn validate_personal(personal: &Personal) -> ValidationResult {
    let mut c = Collector::default();
    c.require(&personal.first_name, "personal.firstName", "First name is required");
    c.require(&personal.last_name, "personal.lastName", "Last name is required");
    if !is_valid_email(&personal.email) {
        c.push("personal.email", "Enter a valid email");
    }
    c.finish()
}

/// An empty summary is acceptable to the form; a non-empty one must meet the
/// length floor.
pub fn validate_summary(summary: &str) -> ValidationResult {
    let mut c = Collector::default();
    if !summary.is_empty() && char_len(summary) < SUMMARY_MIN_CHARS {
        c.push("personal.summary", "Aim for 30+ characters");
    }
    c.finish()
}

pub fn validate_experience(entries: &[Experience]) -> ValidationResult {
    let mut c = Collector::default();
    if entries.is_empty() {
        c.push("experience", "Add at least one role");
    }
    for (i, entry) in entries.iter().enumerate() {
        let prefix = format!("experience.{i}");
        c.require(&entry.company, format!("{prefix}.company"), "Company is required");
        c.require(&entry.role, format!("{prefix}.role"), "Role is required");
        c.require(&entry.start_date, format!("{prefix}.startDate"), "Start date is required");
        check_bullets(&mut c, &prefix, &entry.bullets);
    }
    c.finish()
}

pub fn validate_education(entries: &[Education]) -> ValidationResult {
    let mut c = Collector::default();
    if entries.is_empty() {
        c.push("education", "Add at least one entry");
    }
    for (i, entry) in entries.iter().enumerate() {
        let prefix = format!("education.{i}");
        c.require(&entry.school, format!("{prefix}.school"), "School is required");
        c.require(&entry.degree, format!("{prefix}.degree"), "Degree is required");
        c.require(&entry.start_date, format!("{prefix}.startDate"), "Start date is required");
    }
    c.finish()
}

pub fn validate_skills(entries: &[Skill]) -> ValidationResult {
    let mut c = Collector::default();
    if entries.is_empty() {
        c.push("skills", "Add at least one skill");
    }
    for (i, entry) in entries.iter().enumerate() {
        c.require(&entry.name, format!("skills.{i}.name"), "Skill is required");
    }
    c.finish()
}

/// Languages, certifications and projects accept an empty list here; whether
/// an empty list counts as "done" is the completion engine's call.
pub fn validate_languages(entries: &[Language]) -> ValidationResult {
    let mut c = Collector::default();
    for (i, entry) in entries.iter().enumerate() {
        c.require(&entry.name, format!("languages.{i}.name"), "Language is required");
    }
    c.finish()
}

pub fn validate_certifications(entries: &[Certification]) -> ValidationResult {
    let mut c = Collector::default();
    for (i, entry) in entries.iter().enumerate() {
        let prefix = format!("certifications.{i}");
        c.require(&entry.name, format!("{prefix}.name"), "Certification is required");
        c.require(&entry.issuer, format!("{prefix}.issuer"), "Issuer is required");
    }
    c.finish()
}

pub fn validate_projects(entries: &[Project]) -> ValidationResult {
    let mut c = Collector::default();
    for (i, entry) in entries.iter().enumerate() {
        let prefix = format!("projects.{i}");
        c.require(&entry.name, format!("{prefix}.name"), "Project name is required");
        check_bullets(&mut c, &prefix, &entry.bullets);
    }
    c.finish()
}

pub fn validate_settings(settings: &Settings) -> ValidationResult {
    let mut c = Collector::default();
    c.require(&settings.template_id, "settings.templateId", "Template is required");
    c.finish()
}

pub fn validate_section(section: &Section) -> ValidationResult {
    match section {
        Section::Personal(v) => {
            let mut result = validate_personal(v);
            result.errors.extend(validate_summary(&v.summary).errors);
            ValidationResult::from_errors(result.errors)
        }
        Section::Experience(v) => validate_experience(v),
        Section::Education(v) => validate_education(v),
        Section::Skills(v) => validate_skills(v),
        Section::Languages(v) => validate_languages(v),
        Section::Certifications(v) => validate_certifications(v),
        Section::Projects(v) => validate_projects(v),
        Section::Settings(v) => validate_settings(v),
    }
}

/// Validates the whole document, collecting every section's failures.
pub fn validate_document(doc: &CvDocument) -> ValidationResult {
    let errors = [
        validate_personal(&doc.personal),
        validate_summary(&doc.personal.summary),
        validate_experience(&doc.experience),
        validate_education(&doc.education),
        validate_skills(&doc.skills),
        validate_languages(&doc.languages),
        validate_certifications(&doc.certifications),
        validate_projects(&doc.projects),
        validate_settings(&doc.settings),
    ]
    .into_iter()
    .flat_map(|r| r.errors)
    .collect();
    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::ItemId;

    fn filled_personal() -> Personal {
        Personal {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..Personal::default()
        }
    }

    fn role(company: &str, bullets: &[&str]) -> Experience {
        Experience {
            company: company.to_string(),
            role: "Engineer".to_string(),
            start_date: "2020".to_string(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
            ..Experience::blank()
        }
    }

    #[test]
    fn test_personal_requires_names_and_email() {
        let r = validate_personal(&Personal::default());
        assert!(!r.passed);
        let paths: Vec<_> = r.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["personal.firstName", "personal.lastName", "personal.email"]);
    }

    #[test]
    fn test_personal_passes_with_optional_fields_blank() {
        assert!(validate_personal(&filled_personal()).passed);
    }

    #[test]
    fn test_personal_bad_email_message() {
        let mut p = filled_personal();
        p.email = "not-an-email".to_string();
        let r = validate_personal(&p);
        assert_eq!(r.errors.len(), 1);
        assert_eq!(r.errors[0].message, "Enter a valid email");
    }

    #[test]
    fn test_summary_floor_applies_only_when_present() {
        assert!(validate_summary("").passed);
        assert!(!validate_summary("Too short").passed);
        assert!(validate_summary("Engineer with ten years of shipping APIs").passed);
    }

    #[test]
    fn test_experience_empty_list_fails() {
        let r = validate_experience(&[]);
        assert_eq!(r.errors[0].message, "Add at least one role");
    }

    #[test]
    fn test_experience_blank_entry_reports_each_field() {
        let r = validate_experience(&[Experience::blank()]);
        let paths: Vec<_> = r.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "experience.0.company",
                "experience.0.role",
                "experience.0.startDate",
                "experience.0.bullets.0",
            ]
        );
    }

    #[test]
    fn test_experience_end_date_not_required() {
        let mut entry = role("Acme", &["Shipped X feature reducing errors"]);
        entry.is_current = true;
        assert!(validate_experience(&[entry]).passed);
    }

    #[test]
    fn test_short_bullet_fails() {
        let r = validate_experience(&[role("Acme", &["ok", "Shipped the thing"])]);
        assert_eq!(r.errors.len(), 1);
        assert_eq!(r.errors[0].path, "experience.0.bullets.0");
        assert_eq!(r.errors[0].message, "Bullet is too short");
    }

    #[test]
    fn test_empty_bullet_list_fails() {
        let r = validate_experience(&[role("Acme", &[])]);
        assert_eq!(r.errors[0].message, "Add at least one bullet");
    }

    #[test]
    fn test_optional_lists_accept_empty() {
        assert!(validate_languages(&[]).passed);
        assert!(validate_certifications(&[]).passed);
        assert!(validate_projects(&[]).passed);
        assert!(!validate_skills(&[]).passed);
    }

    #[test]
    fn test_certification_needs_issuer() {
        let cert = Certification {
            id: ItemId::generate(),
            name: "CKA".to_string(),
            issuer: String::new(),
            date: None,
        };
        let r = validate_certifications(&[cert]);
        assert_eq!(r.errors[0].path, "certifications.0.issuer");
    }

    #[test]
    fn test_document_collects_across_sections() {
        let r = validate_document(&CvDocument::default());
        assert!(!r.passed);
        assert!(r.errors.iter().any(|e| e.path.starts_with("personal.")));
        assert!(r.errors.iter().any(|e| e.path.starts_with("experience.")));
        assert!(r.errors.iter().any(|e| e.path.starts_with("education.")));
        assert!(r.errors.iter().any(|e| e.path == "skills"));
        assert!(!r.errors.iter().any(|e| e.path.starts_with("settings")));
    }

    #[test]
    fn test_validate_section_personal_includes_summary_floor() {
        let mut p = filled_personal();
        p.summary = "short".to_string();
        let r = validate_section(&Section::Personal(p));
        assert_eq!(r.errors.len(), 1);
        assert_eq!(r.errors[0].path, "personal.summary");
    }
}

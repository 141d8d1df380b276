use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of a list item. Generated once when the item is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" => Some(SkillLevel::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: ItemId,
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub bullets: Vec<String>,
}

impl Experience {
    pub fn blank() -> Self {
        Self {
            id: ItemId::generate(),
            company: String::new(),
            role: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            is_current: false,
            bullets: vec![String::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: ItemId,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Education {
    pub fn blank() -> Self {
        Self {
            id: ItemId::generate(),
            school: String::new(),
            degree: String::new(),
            field: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            notes: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: ItemId,
    pub name: String,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub bullets: Vec<String>,
}

impl Project {
    pub fn blank() -> Self {
        Self {
            id: ItemId::generate(),
            name: String::new(),
            link: Some(String::new()),
            bullets: vec![String::new()],
        }
    }
}

/// Presentation settings. Never consulted by validation or step gating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_order: Option<Vec<String>>,
}

pub const DEFAULT_TEMPLATE_ID: &str = "classic";
pub const DEFAULT_ACCENT_COLOR: &str = "#1e5b54";
pub const DEFAULT_SECTION_ORDER: &[&str] = &[
    "summary",
    "experience",
    "education",
    "skills",
    "languages",
    "certifications",
    "projects",
];

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            accent_color: Some(DEFAULT_ACCENT_COLOR.to_string()),
            font_scale: Some(1.0),
            section_order: Some(
                DEFAULT_SECTION_ORDER
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        }
    }
}

/// The single résumé document edited by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvDocument {
    pub personal: Personal,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub settings: Settings,
}

impl Default for CvDocument {
    /// Fresh document: blank personal info, one blank experience and one blank
    /// education entry, empty optional lists and the classic template.
    fn default() -> Self {
        Self {
            personal: Personal::default(),
            experience: vec![Experience::blank()],
            education: vec![Education::blank()],
            skills: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
            projects: Vec::new(),
            settings: Settings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Personal,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Projects,
    Settings,
}

impl SectionKey {
    pub const ALL: [SectionKey; 8] = [
        SectionKey::Personal,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Languages,
        SectionKey::Certifications,
        SectionKey::Projects,
        SectionKey::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Personal => "personal",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Languages => "languages",
            SectionKey::Certifications => "certifications",
            SectionKey::Projects => "projects",
            SectionKey::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

impl FromStr for SectionKey {
    type Err = SectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| SectionError::UnknownKey(value.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum SectionError {
    #[error("Unknown section '{0}'")]
    UnknownKey(String),

    #[error("Malformed {key} section: {source}")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One whole section value. Sections are only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Personal(Personal),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
    Languages(Vec<Language>),
    Certifications(Vec<Certification>),
    Projects(Vec<Project>),
    Settings(Settings),
}

impl Section {
    pub fn key(&self) -> SectionKey {
        match self {
            Section::Personal(_) => SectionKey::Personal,
            Section::Experience(_) => SectionKey::Experience,
            Section::Education(_) => SectionKey::Education,
            Section::Skills(_) => SectionKey::Skills,
            Section::Languages(_) => SectionKey::Languages,
            Section::Certifications(_) => SectionKey::Certifications,
            Section::Projects(_) => SectionKey::Projects,
            Section::Settings(_) => SectionKey::Settings,
        }
    }

    /// Decodes a JSON section body for the given key.
    pub fn from_value(key: SectionKey, value: Value) -> Result<Self, SectionError> {
        let malformed = |source| SectionError::Malformed {
            key: key.as_str(),
            source,
        };
        Ok(match key {
            SectionKey::Personal => Section::Personal(serde_json::from_value(value).map_err(malformed)?),
            SectionKey::Experience => {
                Section::Experience(serde_json::from_value(value).map_err(malformed)?)
            }
            SectionKey::Education => {
                Section::Education(serde_json::from_value(value).map_err(malformed)?)
            }
            SectionKey::Skills => Section::Skills(serde_json::from_value(value).map_err(malformed)?),
            SectionKey::Languages => {
                Section::Languages(serde_json::from_value(value).map_err(malformed)?)
            }
            SectionKey::Certifications => {
                Section::Certifications(serde_json::from_value(value).map_err(malformed)?)
            }
            SectionKey::Projects => Section::Projects(serde_json::from_value(value).map_err(malformed)?),
            SectionKey::Settings => Section::Settings(serde_json::from_value(value).map_err(malformed)?),
        })
    }

    pub fn to_value(&self) -> Value {
        let encoded = match self {
            Section::Personal(v) => serde_json::to_value(v),
            Section::Experience(v) => serde_json::to_value(v),
            Section::Education(v) => serde_json::to_value(v),
            Section::Skills(v) => serde_json::to_value(v),
            Section::Languages(v) => serde_json::to_value(v),
            Section::Certifications(v) => serde_json::to_value(v),
            Section::Projects(v) => serde_json::to_value(v),
            Section::Settings(v) => serde_json::to_value(v),
        };
        // Plain structs with string keys always encode.
        encoded.unwrap_or(Value::Null)
    }
}

impl CvDocument {
    pub fn section(&self, key: SectionKey) -> Section {
        match key {
            SectionKey::Personal => Section::Personal(self.personal.clone()),
            SectionKey::Experience => Section::Experience(self.experience.clone()),
            SectionKey::Education => Section::Education(self.education.clone()),
            SectionKey::Skills => Section::Skills(self.skills.clone()),
            SectionKey::Languages => Section::Languages(self.languages.clone()),
            SectionKey::Certifications => Section::Certifications(self.certifications.clone()),
            SectionKey::Projects => Section::Projects(self.projects.clone()),
            SectionKey::Settings => Section::Settings(self.settings.clone()),
        }
    }

    /// Swaps one section in wholesale. No validation happens here.
    pub fn apply(&mut self, section: Section) {
        match section {
            Section::Personal(v) => self.personal = v,
            Section::Experience(v) => self.experience = v,
            Section::Education(v) => self.education = v,
            Section::Skills(v) => self.skills = v,
            Section::Languages(v) => self.languages = v,
            Section::Certifications(v) => self.certifications = v,
            Section::Projects(v) => self.projects = v,
            Section::Settings(v) => self.settings = v,
        }
    }
}

// CV data model: the single document, its sections, and the item-level
// helpers the step forms use to edit them.

pub mod bullets;
pub mod format;
pub mod models;
pub mod skills;

pub use models::{
    Certification, CvDocument, Education, Experience, ItemId, Language, Personal, Project,
    Section, SectionError, SectionKey, Settings, Skill, SkillLevel,
};

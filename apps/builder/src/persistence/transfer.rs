use serde_json::Value;
use thiserror::Error;

use crate::cv::skills::normalize_skills;
use crate::cv::CvDocument;

pub const EXPORT_FILE_NAME: &str = "cv-data.json";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON file.")]
    Invalid(#[from] serde_json::Error),
}

/// Serializes the whole document as indented, human-readable JSON.
pub fn export_document(doc: &CvDocument) -> String {
    // A document is plain data with string keys; encoding cannot fail.
    serde_json::to_string_pretty(doc).unwrap_or_default()
}

/// Parses a user-supplied file as a complete document. All or nothing.
pub fn import_document(text: &str) -> Result<CvDocument, ImportError> {
    Ok(serde_json::from_str(text)?)
}

/// Reads a previously saved blob, repairing skills saved before ids were
/// mandatory. Returns `None` for anything that does not decode.
pub fn load_saved_document(text: &str) -> Option<CvDocument> {
    let mut value: Value = serde_json::from_str(text).ok()?;
    let fields = value.as_object_mut()?;
    let skills = fields.get("skills").map(normalize_skills).unwrap_or_default();
    fields.insert("skills".to_string(), serde_json::to_value(skills).ok()?);
    serde_json::from_value(value).ok()
}

use std::collections::HashSet;

use serde_json::Value;

use crate::cv::models::{ItemId, Skill, SkillLevel};

/// Rebuilds the skills list from the tag editor's names.
///
/// Existing items are reused by name so their ids survive re-ordering; each id
/// is claimed at most once, so a duplicated tag produces a fresh item. New
/// skills start at `intermediate`.
pub fn skills_from_tags(existing: &[Skill], tags: &[String]) -> Vec<Skill> {
    let mut used: HashSet<&ItemId> = HashSet::new();
    tags.iter()
        .map(|tag| {
            let reused = existing
                .iter()
                .find(|skill| skill.name == *tag && !used.contains(&skill.id));
            match reused {
                Some(skill) => {
                    used.insert(&skill.id);
                    Skill {
                        name: tag.clone(),
                        ..skill.clone()
                    }
                }
                None => Skill {
                    id: ItemId::generate(),
                    name: tag.clone(),
                    level: Some(SkillLevel::Intermediate),
                },
            }
        })
        .collect()
}

/// Repairs a raw skills value read back from storage.
///
/// Older saves may hold bare strings or items without an id. Names are
/// trimmed, blank entries dropped, missing or blank ids backfilled and
/// unknown levels discarded. Anything that is not a list yields no skills.
pub fn normalize_skills(raw: &Value) -> Vec<Skill> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => {
                let name = name.trim();
                (!name.is_empty()).then(|| Skill {
                    id: ItemId::generate(),
                    name: name.to_string(),
                    level: None,
                })
            }
            Value::Object(fields) => {
                let name = fields.get("name")?.as_str()?.trim();
                if name.is_empty() {
                    return None;
                }
                let id = fields
                    .get("id")
                    .and_then(Value::as_str)
                    .filter(|id| !id.trim().is_empty())
                    .map(ItemId::from)
                    .unwrap_or_else(ItemId::generate);
                let level = fields
                    .get("level")
                    .and_then(Value::as_str)
                    .and_then(SkillLevel::parse);
                Some(Skill {
                    id,
                    name: name.to_string(),
                    level,
                })
            }
            _ => None,
        })
        .collect()
}

// Template registry. Templates only decide presentation: the document is
// handed through unchanged and never influences validation or gating.

pub mod render;

use serde::Serialize;

pub use render::render_markdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const TEMPLATES: [TemplateDefinition; 2] = [
    TemplateDefinition {
        id: "classic",
        name: "Classic",
        description: "Clean single-column layout for traditional roles.",
    },
    TemplateDefinition {
        id: "modern",
        name: "Modern",
        description: "Two-column layout with a refined accent section.",
    },
];

/// Looks a template up by id, falling back to the first one.
pub fn template_by_id(id: &str) -> &'static TemplateDefinition {
    TEMPLATES
        .iter()
        .find(|template| template.id == id)
        .unwrap_or(&TEMPLATES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_template() {
        assert_eq!(template_by_id("modern").name, "Modern");
    }

    #[test]
    fn test_unknown_template_falls_back_to_classic() {
        assert_eq!(template_by_id("retro").id, "classic");
        assert_eq!(template_by_id("").id, "classic");
    }
}

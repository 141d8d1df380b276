//! Plain markdown rendering of a CV, used for the live preview and the print
//! output of the local shell.

use crate::cv::format::{compact_contact, format_date_range, full_name};
use crate::cv::models::DEFAULT_SECTION_ORDER;
use crate::cv::{CvDocument, SkillLevel};
use crate::templates::template_by_id;

/// `rust` → `Rust`; short all-caps words such as `AWS` stay as they are.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            if word.chars().count() <= 4 && word == word.to_uppercase() {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn language_level(level: Option<SkillLevel>) -> &'static str {
    match level {
        Some(SkillLevel::Beginner) => "Conversational",
        Some(SkillLevel::Intermediate) => "Professional",
        Some(SkillLevel::Advanced) => "Fluent",
        None => "",
    }
}

fn bullet_lines(md: &mut String, bullets: &[String]) {
    for bullet in bullets.iter().map(|b| b.trim()).filter(|b| !b.is_empty()) {
        md.push_str(&format!("- {bullet}\n"));
    }
}

/// Listed sections first, in the configured order; anything the setting
/// leaves out follows in the default order so no content disappears.
fn section_order(doc: &CvDocument) -> Vec<&str> {
    let mut order: Vec<&str> = Vec::new();
    if let Some(configured) = &doc.settings.section_order {
        for name in configured {
            if DEFAULT_SECTION_ORDER.contains(&name.as_str()) && !order.contains(&name.as_str()) {
                order.push(name.as_str());
            }
        }
    }
    for &name in DEFAULT_SECTION_ORDER {
        if !order.contains(&name) {
            order.push(name);
        }
    }
    order
}

fn render_section(md: &mut String, doc: &CvDocument, name: &str) {
    match name {
        "summary" if !doc.personal.summary.is_empty() => {
            md.push_str("## Summary\n\n");
            md.push_str(doc.personal.summary.trim());
            md.push_str("\n\n");
        }
        "experience" if !doc.experience.is_empty() => {
            md.push_str("## Experience\n\n");
            for role in &doc.experience {
                let title = [role.role.trim(), role.company.trim()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" — ");
                md.push_str(&format!("### {}\n", if title.is_empty() { "Role" } else { title.as_str() }));
                let meta = compact_contact([
                    format_date_range(&role.start_date, &role.end_date, role.is_current).as_str(),
                    role.location.as_str(),
                ]);
                if !meta.is_empty() {
                    md.push_str(&format!("_{meta}_\n"));
                }
                bullet_lines(md, &role.bullets);
                md.push('\n');
            }
        }
        "education" if !doc.education.is_empty() => {
            md.push_str("## Education\n\n");
            for edu in &doc.education {
                let degree = compact_contact([edu.degree.as_str(), edu.field.as_str()]);
                let title = [degree.as_str(), edu.school.trim()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" — ");
                md.push_str(&format!("### {}\n", if title.is_empty() { "Education" } else { title.as_str() }));
                let dates = format_date_range(&edu.start_date, &edu.end_date, false);
                if !dates.is_empty() {
                    md.push_str(&format!("_{dates}_\n"));
                }
                if let Some(notes) = edu.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                    md.push_str(notes);
                    md.push('\n');
                }
                md.push('\n');
            }
        }
        "skills" if !doc.skills.is_empty() => {
            let names: Vec<String> = doc.skills.iter().map(|s| title_case(&s.name)).collect();
            md.push_str(&format!("## Skills\n\n{}\n\n", names.join(" • ")));
        }
        "languages" if !doc.languages.is_empty() => {
            let names: Vec<String> = doc
                .languages
                .iter()
                .map(|lang| match language_level(lang.level) {
                    "" => title_case(&lang.name),
                    level => format!("{} ({level})", title_case(&lang.name)),
                })
                .collect();
            md.push_str(&format!("## Languages\n\n{}\n\n", names.join(" • ")));
        }
        "certifications" if !doc.certifications.is_empty() => {
            md.push_str("## Certifications\n\n");
            for cert in &doc.certifications {
                let detail = compact_contact([cert.issuer.as_str(), cert.date.as_deref().unwrap_or("")]);
                if detail.is_empty() {
                    md.push_str(&format!("- **{}**\n", cert.name.trim()));
                } else {
                    md.push_str(&format!("- **{}** • {detail}\n", cert.name.trim()));
                }
            }
            md.push('\n');
        }
        "projects" if !doc.projects.is_empty() => {
            md.push_str("## Projects\n\n");
            for project in &doc.projects {
                let name = match project.name.trim() {
                    "" => "Project",
                    name => name,
                };
                match project.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
                    Some(link) => md.push_str(&format!("### {name} ({link})\n")),
                    None => md.push_str(&format!("### {name}\n")),
                }
                bullet_lines(md, &project.bullets);
                md.push('\n');
            }
        }
        _ => {}
    }
}

/// Renders the document as markdown using its selected template's label.
pub fn render_markdown(doc: &CvDocument) -> String {
    let name = match full_name(doc) {
        n if n.is_empty() => "Your Name".to_string(),
        n => n,
    };
    let headline = match doc.personal.headline.trim() {
        "" => "Your Headline",
        h => h,
    };
    let p = &doc.personal;
    let contact = compact_contact([
        p.email.as_str(),
        p.phone.as_str(),
        p.location.as_str(),
        p.linkedin.as_str(),
        p.website.as_str(),
    ]);

    let mut md = format!("# {name}\n\n_{headline}_\n\n");
    if !contact.is_empty() {
        md.push_str(&contact);
        md.push_str("\n\n");
    }
    md.push_str(&format!(
        "<!-- template: {} -->\n\n",
        template_by_id(&doc.settings.template_id).name
    ));

    for section in section_order(doc) {
        render_section(&mut md, doc, section);
    }
    md
}

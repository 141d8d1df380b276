//! Bullet list helpers shared by experience and project entries.
//!
//! A bullets list always has at least one row: an item without content holds a
//! single empty-string placeholder so the editor has something to type into.

pub const MAX_BULLETS: usize = 8;

/// Splits a pasted block of text into bullet rows.
///
/// Newlines win over `•`, which wins over `;`. Leading `•` or `-` markers are
/// stripped, blank rows dropped, and the result is capped at `limit`.
pub fn split_pasted_bullets(text: &str, limit: usize) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = if normalized.contains('\n') {
        normalized.split('\n').collect()
    } else if normalized.contains('•') {
        normalized.split('•').collect()
    } else if normalized.contains(';') {
        normalized.split(';').collect()
    } else {
        vec![normalized]
    };

    parts
        .into_iter()
        .map(|part| strip_marker(part).trim().to_string())
        .filter(|part| !part.is_empty())
        .take(limit)
        .collect()
}

fn strip_marker(part: &str) -> &str {
    let trimmed = part.trim_start();
    for marker in ['•', '-'] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    part
}

/// Appends an empty row for the editor.
pub fn add_bullet(bullets: &mut Vec<String>) {
    bullets.push(String::new());
}

/// Removes the row at `index`, falling back to the placeholder row when the
/// list would otherwise be empty.
pub fn remove_bullet(bullets: &mut Vec<String>, index: usize) {
    if index < bullets.len() {
        bullets.remove(index);
    }
    ensure_placeholder(bullets);
}

pub fn ensure_placeholder(bullets: &mut Vec<String>) {
    if bullets.is_empty() {
        bullets.push(String::new());
    }
}

/// Replaces the row at `index` with the rows of a pasted block, keeping the
/// list within `MAX_BULLETS`. An index past the end appends.
pub fn paste_bullets(bullets: &mut Vec<String>, index: usize, text: &str) {
    let at = index.min(bullets.len());
    let replaced = usize::from(at < bullets.len());
    let room = MAX_BULLETS.saturating_sub(bullets.len() - replaced);
    let rows = split_pasted_bullets(text, room);
    if rows.is_empty() {
        return;
    }
    bullets.splice(at..at + replaced, rows);
}

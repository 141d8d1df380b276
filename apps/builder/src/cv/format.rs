use chrono::Month;

use crate::cv::models::CvDocument;

/// Three-letter English month label, e.g. `Mar`.
fn month_label(month: Month) -> &'static str {
    &month.name()[..3]
}

fn month_from_number(raw: &str) -> Option<Month> {
    let n: u8 = raw.parse().ok()?;
    Month::try_from(n).ok()
}

fn is_year(raw: &str) -> bool {
    raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit())
}

fn is_month_number(raw: &str) -> bool {
    (1..=2).contains(&raw.len()) && raw.chars().all(|c| c.is_ascii_digit())
}

/// Normalizes one free-text date to `Mon YYYY` where it can be recognized.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY/MM`, `MM-YYYY`, `MM/YYYY` and
/// `<month name> YYYY`. Anything else is returned trimmed but untouched.
pub fn normalize_date_part(value: &str) -> String {
    let raw = value.trim();
    if raw.is_empty() || is_year(raw) {
        return raw.to_string();
    }

    if let Some((left, right)) = raw.split_once(['-', '/']) {
        let (year, month) = if is_year(left) && is_month_number(right) {
            (left, right)
        } else if is_month_number(left) && is_year(right) {
            (right, left)
        } else {
            return raw.to_string();
        };
        return match month_from_number(month) {
            Some(m) => format!("{} {}", month_label(m), year),
            None => raw.to_string(),
        };
    }

    if let Some((name, year)) = raw.split_once(char::is_whitespace) {
        let year = year.trim();
        if is_year(year) && name.len() >= 3 && name.chars().all(|c| c.is_ascii_alphabetic()) {
            let prefix = name[..3].to_ascii_lowercase();
            let month = (1..=12u8)
                .filter_map(|n| Month::try_from(n).ok())
                .find(|m| month_label(*m).to_ascii_lowercase() == prefix);
            if let Some(m) = month {
                return format!("{} {}", month_label(m), year);
            }
        }
    }

    raw.to_string()
}

/// Renders a role or study period, e.g. `Mar 2020 – Present`.
pub fn format_date_range(start: &str, end: &str, is_current: bool) -> String {
    let start = normalize_date_part(start);
    let end = normalize_date_part(end);
    if start.is_empty() && end.is_empty() {
        return String::new();
    }
    if is_current {
        return format!("{start} – Present").trim().to_string();
    }
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} – {end}"),
        (false, true) => start,
        _ => end,
    }
}

/// Joins the non-blank contact parts with ` • `.
pub fn compact_contact<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn full_name(doc: &CvDocument) -> String {
    format!("{} {}", doc.personal.first_name, doc.personal.last_name)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_only_is_kept() {
        assert_eq!(normalize_date_part(" 2020 "), "2020");
    }

    #[test]
    fn test_year_month_forms() {
        assert_eq!(normalize_date_part("2020-03"), "Mar 2020");
        assert_eq!(normalize_date_part("2020/3"), "Mar 2020");
        assert_eq!(normalize_date_part("11/2019"), "Nov 2019");
        assert_eq!(normalize_date_part("2020-13"), "2020-13");
    }

    #[test]
    fn test_named_month() {
        assert_eq!(normalize_date_part("september 2021"), "Sep 2021");
        assert_eq!(normalize_date_part("Sept 2021"), "Sep 2021");
        assert_eq!(normalize_date_part("Spring 2021"), "Spring 2021");
    }

    #[test]
    fn test_range_variants() {
        assert_eq!(format_date_range("2020-01", "2022-06", false), "Jan 2020 – Jun 2022");
        assert_eq!(format_date_range("2020", "", true), "2020 – Present");
        assert_eq!(format_date_range("", "", true), "");
        assert_eq!(format_date_range("", "2019", false), "2019");
        assert_eq!(format_date_range("2018", "", false), "2018");
    }

    #[test]
    fn test_compact_contact_skips_blank() {
        assert_eq!(
            compact_contact(["a@b.io", "  ", "Berlin ", ""]),
            "a@b.io • Berlin"
        );
    }

    #[test]
    fn test_full_name_trims() {
        let mut doc = CvDocument::default();
        doc.personal.first_name = "Ada".to_string();
        assert_eq!(full_name(&doc), "Ada");
    }
}

//! Result rendering for the terminal
//!
//! Mirrors the results view contract: a count line, one line per hit with
//! the matched substring highlighted inline, a distinct message for "no
//! matches", and a separate "no data" state when the dataset is empty.

use crate::models::OrgSummary;
use std::fmt::Write as _;

const HIGHLIGHT_START: &str = "\x1b[1;33m";
const HIGHLIGHT_END: &str = "\x1b[0m";

/// Wrap every case-insensitive occurrence of `query` in `name` with the
/// highlight escape codes.
///
/// Offsets are taken from the lowercased form; for the rare name whose
/// lowercasing changes its byte length or shifts a char boundary (total
/// length can survive the shift, e.g. "İ" grows while "Ω" as the ohm
/// sign shrinks) the name is returned unhighlighted.
pub fn highlight(name: &str, query: &str) -> String {
    if query.is_empty() {
        return name.to_string();
    }
    let hay = name.to_lowercase();
    let needle = query.to_lowercase();
    if hay.len() != name.len() || needle.is_empty() {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut cursor = 0;
    while let Some(found) = hay[cursor..].find(&needle) {
        let start = cursor + found;
        let end = start + needle.len();
        if !name.is_char_boundary(start) || !name.is_char_boundary(end) {
            return name.to_string();
        }
        out.push_str(&name[cursor..start]);
        out.push_str(HIGHLIGHT_START);
        out.push_str(&name[start..end]);
        out.push_str(HIGHLIGHT_END);
        cursor = end;
    }
    out.push_str(&name[cursor..]);
    out
}

/// One display line per hit: highlighted name plus whatever optional
/// metadata the row carried.
pub fn result_line(summary: &OrgSummary, query: &str) -> String {
    let mut line = highlight(&summary.name, query);

    let location: Vec<&str> = [summary.town_city.as_deref(), summary.county.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !location.is_empty() {
        let _ = write!(line, " - {}", location.join(", "));
    }
    if let Some(type_rating) = &summary.type_rating {
        let _ = write!(line, " [{type_rating}]");
    }
    if let Some(route) = &summary.route {
        let _ = write!(line, " ({route})");
    }
    line
}

/// Render a full results view for one query.
pub fn render_results(results: &[OrgSummary], query: &str) -> String {
    if results.is_empty() {
        return format!("No companies found matching \"{query}\".\nTry a different search term.");
    }

    let mut out = format!("Found {} companies.\n", results.len());
    for summary in results {
        let _ = writeln!(out, "  {}", result_line(summary, query));
    }
    out
}

/// Message for the distinct empty-dataset state (not a search miss).
pub fn render_no_data() -> String {
    "No companies found in the database. Please upload a CSV first.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrgRow, NAME_FIELD};
    use serde_json::json;

    #[test]
    fn highlight_wraps_the_match_case_insensitively() {
        let highlighted = highlight("Acme Corp", "acme");
        assert_eq!(highlighted, format!("{HIGHLIGHT_START}Acme{HIGHLIGHT_END} Corp"));
    }

    #[test]
    fn highlight_marks_every_occurrence() {
        let highlighted = highlight("Abba Cabbages", "ab");
        assert_eq!(highlighted.matches(HIGHLIGHT_START).count(), 2);
    }

    #[test]
    fn highlight_without_query_is_identity() {
        assert_eq!(highlight("Acme Corp", ""), "Acme Corp");
    }

    #[test]
    fn highlight_falls_back_when_lowercasing_shifts_char_boundaries() {
        // "İΩ" (dotted capital I, ohm sign) keeps its total byte length
        // when lowercased but the boundary between the two chars moves,
        // so the match offset lands mid-char in the original.
        assert_eq!(highlight("İ\u{2126}", "\u{3c9}"), "İ\u{2126}");
    }

    #[test]
    fn highlight_falls_back_when_lowercasing_changes_length() {
        assert_eq!(highlight("İstanbul Ltd", "st"), "İstanbul Ltd");
    }

    #[test]
    fn result_line_appends_metadata() {
        let row = OrgRow::from_fields([
            (NAME_FIELD, json!("Acme Corp")),
            ("Town/City", json!("Dover")),
            ("County", json!("Kent")),
            ("Type & Rating", json!("Worker (A rating)")),
            ("Route", json!("Skilled Worker")),
        ]);
        let summary = crate::models::OrgSummary::from_row(&row).unwrap();
        let line = result_line(&summary, "");
        assert!(line.contains("Acme Corp"));
        assert!(line.contains("Dover, Kent"));
        assert!(line.contains("[Worker (A rating)]"));
        assert!(line.contains("(Skilled Worker)"));
    }

    #[test]
    fn empty_results_render_the_no_matches_message() {
        let rendered = render_results(&[], "xyz");
        assert!(rendered.contains("No companies found matching \"xyz\""));
    }

    #[test]
    fn results_render_with_a_count_line() {
        let row = OrgRow::from_fields([(NAME_FIELD, json!("Acme Corp"))]);
        let summary = crate::models::OrgSummary::from_row(&row).unwrap();
        let rendered = render_results(&[summary], "acme");
        assert!(rendered.starts_with("Found 1 companies."));
    }
}

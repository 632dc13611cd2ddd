//! Formatting rules for the paper card.
//!
//! Everything here is a pure function of a [`Paper`] (or one of its
//! fields). Limits are fixed; the card must look the same everywhere.

use serde::Serialize;

use crate::models::Paper;

/// Authors listed by name before collapsing to "et al.".
pub const MAX_VISIBLE_AUTHORS: usize = 3;
/// Characters of the abstract shown on the card.
pub const ABSTRACT_EXCERPT_CHARS: usize = 200;
/// Characters of the DOI shown inside its tag.
pub const DOI_TAG_CHARS: usize = 20;
/// MeSH terms shown as individual tags.
pub const MAX_VISIBLE_MESH_TERMS: usize = 3;
/// Marker appended to anything cut short.
pub const ELLIPSIS: &str = "...";

/// `"A, B, C et al. (5 authors)"` style author line.
pub fn author_summary(authors: &[String]) -> String {
    let visible = authors
        .iter()
        .take(MAX_VISIBLE_AUTHORS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if authors.len() > MAX_VISIBLE_AUTHORS {
        format!("{visible} et al. ({} authors)", authors.len())
    } else {
        visible
    }
}

pub fn publish_year(paper: &Paper) -> Option<i32> {
    paper.publish_date.year()
}

pub fn abstract_excerpt(abstract_text: &str) -> String {
    truncate_chars(abstract_text, ABSTRACT_EXCERPT_CHARS)
}

pub fn truncate_doi(doi: &str) -> String {
    truncate_chars(doi, DOI_TAG_CHARS)
}

/// Keep the first `limit` characters, adding [`ELLIPSIS`] if anything was
/// dropped.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Pmid,
    Doi,
    Citations,
    MeshTerm,
    MoreMeshTerms,
}

/// A small labelled fact shown under the abstract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub kind: TagKind,
    pub label: String,
}

impl Tag {
    fn new(kind: TagKind, label: String) -> Self {
        Self { kind, label }
    }
}

/// PMID, DOI and citation tags, in that order, for the fields present.
pub fn identifier_tags(paper: &Paper) -> Vec<Tag> {
    let mut tags = Vec::new();

    if let Some(pmid) = paper.pmid.as_deref() {
        tags.push(Tag::new(TagKind::Pmid, format!("PMID: {pmid}")));
    }

    if let Some(doi) = paper.doi.as_deref() {
        tags.push(Tag::new(TagKind::Doi, format!("DOI: {}", truncate_doi(doi))));
    }

    // Zero citations is still a known count.
    if let Some(count) = paper.citation_count {
        tags.push(Tag::new(TagKind::Citations, format!("{count} citations")));
    }

    tags
}

pub fn mesh_tags(paper: &Paper) -> Vec<Tag> {
    let Some(terms) = paper.mesh_terms.as_deref() else {
        return Vec::new();
    };

    let mut tags = terms
        .iter()
        .take(MAX_VISIBLE_MESH_TERMS)
        .map(|term| Tag::new(TagKind::MeshTerm, term.clone()))
        .collect::<Vec<_>>();

    if terms.len() > MAX_VISIBLE_MESH_TERMS {
        let rest = terms.len() - MAX_VISIBLE_MESH_TERMS;
        tags.push(Tag::new(TagKind::MoreMeshTerms, format!("+{rest} more")));
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn labels(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(|tag| tag.label.as_str()).collect()
    }

    #[test]
    fn author_summary_collapses_after_three() {
        assert_eq!(
            author_summary(&names(&["A", "B", "C", "D"])),
            "A, B, C et al. (4 authors)"
        );
        assert_eq!(
            author_summary(&names(&["A", "B", "C", "D", "E", "F", "G"])),
            "A, B, C et al. (7 authors)"
        );
    }

    #[test]
    fn author_summary_lists_short_lists_in_full() {
        assert_eq!(author_summary(&names(&["A", "B", "C"])), "A, B, C");
        assert_eq!(author_summary(&names(&["Solo"])), "Solo");
        assert_eq!(author_summary(&[]), "");
    }

    #[test]
    fn abstract_excerpt_keeps_short_text() {
        let exact = "x".repeat(ABSTRACT_EXCERPT_CHARS);
        assert_eq!(abstract_excerpt(&exact), exact);
        assert_eq!(abstract_excerpt("short"), "short");
        assert_eq!(abstract_excerpt(""), "");
    }

    #[test]
    fn abstract_excerpt_cuts_at_two_hundred_chars() {
        let long = format!("{}{}", "a".repeat(200), "tail that is dropped");
        let excerpt = abstract_excerpt(&long);
        assert_eq!(excerpt, format!("{}...", "a".repeat(200)));
        assert_eq!(excerpt.chars().count(), 203);

        let other = "b".repeat(5000);
        assert_eq!(abstract_excerpt(&other).chars().count(), 203);
    }

    #[test]
    fn abstract_excerpt_counts_chars_not_bytes() {
        let long = "é".repeat(250);
        let excerpt = abstract_excerpt(&long);
        assert_eq!(excerpt.chars().count(), 203);
        assert!(excerpt.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn doi_tag_is_bounded() {
        let paper = Paper {
            doi: Some(format!("10.1000/{}", "z".repeat(300))),
            ..Default::default()
        };
        let tags = identifier_tags(&paper);
        let doi_tag = tags.iter().find(|tag| tag.kind == TagKind::Doi).unwrap();
        let shown = doi_tag.label.trim_start_matches("DOI: ");
        assert_eq!(shown.chars().count(), DOI_TAG_CHARS + ELLIPSIS.len());
        assert!(shown.ends_with(ELLIPSIS));

        assert_eq!(truncate_doi("10.1038/nature12373"), "10.1038/nature12373");
        assert_eq!(truncate_doi("10.1016/j.cell.2020.01.001"), "10.1016/j.cell.2020....");
    }

    #[test]
    fn identifier_tags_follow_field_presence() {
        let paper = Paper {
            pmid: Some("31415926".to_string()),
            doi: Some("10.1/x".to_string()),
            citation_count: Some(42),
            ..Default::default()
        };
        assert_eq!(
            labels(&identifier_tags(&paper)),
            vec!["PMID: 31415926", "DOI: 10.1/x", "42 citations"]
        );

        assert!(identifier_tags(&Paper::default()).is_empty());
    }

    #[test]
    fn zero_citations_still_shown() {
        let paper = Paper {
            citation_count: Some(0),
            ..Default::default()
        };
        assert_eq!(labels(&identifier_tags(&paper)), vec!["0 citations"]);
    }

    #[test]
    fn mesh_tags_collapse_after_three() {
        let paper = Paper {
            mesh_terms: Some(names(&["X", "Y", "Z", "W"])),
            ..Default::default()
        };
        let tags = mesh_tags(&paper);
        assert_eq!(labels(&tags), vec!["X", "Y", "Z", "+1 more"]);
        assert_eq!(tags[3].kind, TagKind::MoreMeshTerms);
    }

    #[test]
    fn mesh_tags_absent_or_empty() {
        assert!(mesh_tags(&Paper::default()).is_empty());

        let paper = Paper {
            mesh_terms: Some(Vec::new()),
            ..Default::default()
        };
        assert!(mesh_tags(&paper).is_empty());

        let paper = Paper {
            mesh_terms: Some(names(&["X", "Y"])),
            ..Default::default()
        };
        assert_eq!(labels(&mesh_tags(&paper)), vec!["X", "Y"]);
    }

    #[test]
    fn publish_year_reads_date() {
        let paper = Paper::new("T", "J", "2013-07-11");
        assert_eq!(publish_year(&paper), Some(2013));
        let paper = Paper::new("T", "J", "garbage");
        assert_eq!(publish_year(&paper), None);
    }
}

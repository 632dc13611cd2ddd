use serde::Serialize;

use crate::display::{
    Tag, abstract_excerpt, author_summary, identifier_tags, mesh_tags, publish_year,
};
use crate::link::ExternalLink;
use crate::models::Paper;

/// Every value a paper card shows, computed for a single render.
///
/// Built fresh from a [`Paper`] each time and never written back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    pub authors: String,
    pub journal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub abstract_excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ExternalLink>,
    pub identifier_tags: Vec<Tag>,
    pub mesh_tags: Vec<Tag>,
    pub is_main: bool,
}

impl CardView {
    pub fn new(paper: &Paper, is_main: bool) -> Self {
        Self {
            title: paper.title.clone(),
            authors: author_summary(&paper.authors),
            journal: paper.journal.clone(),
            year: publish_year(paper),
            abstract_excerpt: abstract_excerpt(&paper.abstract_text),
            link: ExternalLink::for_paper(paper),
            identifier_tags: identifier_tags(paper),
            mesh_tags: mesh_tags(paper),
            is_main,
        }
    }

    /// `"Journal • 2021"`, or just the journal when the year is unknown.
    pub fn journal_line(&self) -> String {
        match self.year {
            Some(year) => format!("{} • {year}", self.journal),
            None => self.journal.clone(),
        }
    }

    /// Plain-text rendition used by the CLI.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();

        let marker = if self.is_main { "★ " } else { "" };
        out.push_str(&format!("{marker}{}\n", self.title));
        // Kept even when empty so the layout matches the terminal card.
        out.push_str(format!("  {}", self.authors).trim_end());
        out.push('\n');
        out.push_str(&format!("  {}\n", self.journal_line()));
        if !self.abstract_excerpt.is_empty() {
            out.push_str(&format!("\n  {}\n", self.abstract_excerpt));
        }

        let tags = self
            .identifier_tags
            .iter()
            .chain(self.mesh_tags.iter())
            .map(|tag| format!("[{}]", tag.label))
            .collect::<Vec<_>>();
        if !tags.is_empty() {
            out.push_str(&format!("\n  {}\n", tags.join(" ")));
        }

        if let Some(link) = &self.link {
            out.push_str(&format!("  ↗ {}\n", link.url));
        }

        out
    }
}

use serde::Serialize;

use crate::error::{PaperCardError, Result};
use crate::models::Paper;

pub const DOI_RESOLVER: &str = "https://doi.org/";
pub const PUBMED_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Doi,
    PubMed,
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkKind::Doi => write!(f, "DOI"),
            LinkKind::PubMed => write!(f, "PubMed"),
        }
    }
}

/// Where the card's external-link icon points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub kind: LinkKind,
    pub url: String,
}

impl ExternalLink {
    /// DOI first, PubMed second, nothing when the paper has neither.
    pub fn for_paper(paper: &Paper) -> Option<Self> {
        if let Some(doi) = paper.doi.as_deref() {
            return Some(Self {
                kind: LinkKind::Doi,
                url: format!("{DOI_RESOLVER}{doi}"),
            });
        }

        paper.pmid.as_deref().map(|pmid| Self {
            kind: LinkKind::PubMed,
            url: format!("{PUBMED_BASE}{pmid}/"),
        })
    }
}

/// Hand the link to the system URL handler and return immediately.
pub fn open_external(link: &ExternalLink) -> Result<()> {
    open::that_detached(&link.url).map_err(|source| {
        tracing::warn!(url = %link.url, error = %source, "failed to open external link");
        PaperCardError::OpenLink {
            url: link.url.clone(),
            source,
        }
    })?;
    tracing::info!(kind = %link.kind, url = %link.url, "opened external link");
    Ok(())
}

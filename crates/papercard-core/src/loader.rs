use std::path::Path;

use serde::Deserialize;

use crate::error::{PaperCardError, Result};
use crate::models::Paper;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPapers {
    Many(Vec<Paper>),
    One(Box<Paper>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TomlPapers {
    Many { papers: Vec<Paper> },
    One(Box<Paper>),
}

/// Read one paper or a list of papers from a `.json` or `.toml` file.
pub fn load_papers(path: &Path) -> Result<Vec<Paper>> {
    if !path.exists() {
        return Err(PaperCardError::PaperFileNotFound(
            path.display().to_string(),
        ));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = std::fs::read_to_string(path)?;
    let papers = match extension.as_str() {
        "json" => parse_json(&contents)?,
        "toml" => parse_toml(&contents)?,
        _ => {
            return Err(PaperCardError::UnsupportedFormat(
                path.display().to_string(),
            ));
        }
    };

    if papers.is_empty() {
        return Err(PaperCardError::EmptyPaperFile(path.display().to_string()));
    }

    tracing::info!(path = %path.display(), count = papers.len(), "loaded papers");
    Ok(papers)
}

pub fn parse_json(contents: &str) -> Result<Vec<Paper>> {
    Ok(match serde_json::from_str::<JsonPapers>(contents)? {
        JsonPapers::Many(papers) => papers,
        JsonPapers::One(paper) => vec![*paper],
    })
}

pub fn parse_toml(contents: &str) -> Result<Vec<Paper>> {
    Ok(match toml::from_str::<TomlPapers>(contents)? {
        TomlPapers::Many { papers } => papers,
        TomlPapers::One(paper) => vec![*paper],
    })
}

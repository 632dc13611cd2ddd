use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A scholarly paper as supplied by the data layer.
///
/// The card only ever reads a `Paper`; every displayed value is derived
/// from it on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    pub journal: String,

    pub publish_date: PublishDate,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_terms: Option<Vec<String>>,
}

impl Paper {
    pub fn new(
        title: impl Into<String>,
        journal: impl Into<String>,
        publish_date: impl Into<PublishDate>,
    ) -> Self {
        Self {
            title: title.into(),
            journal: journal.into(),
            publish_date: publish_date.into(),
            ..Default::default()
        }
    }

    pub fn has_identifier(&self) -> bool {
        self.doi.is_some() || self.pmid.is_some()
    }
}

/// Publication date exactly as it arrived.
///
/// Kept as text so that a malformed date never rejects the whole record;
/// [`PublishDate::year`] returns `None` when nothing can be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishDate(String);

impl PublishDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar year of the date.
    pub fn year(&self) -> Option<i32> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.year());
        }

        // ISO 8601 with an offset: `Z`, `+05:30` or `+0530`, seconds optional
        for fmt in [
            "%Y-%m-%dT%H:%M:%S%.f%#z",
            "%Y-%m-%dT%H:%M%#z",
            "%Y-%m-%d %H:%M:%S%.f%#z",
            "%Y-%m-%d %H:%M%#z",
        ] {
            if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
                return Some(dt.year());
            }
        }

        for fmt in [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt.year());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.year());
        }

        // Year-month and bare year
        let year_part = match raw.split_once('-') {
            Some((year, month)) => {
                let month: u32 = month.parse().ok()?;
                if !(1..=12).contains(&month) {
                    return None;
                }
                year
            }
            None => raw,
        };
        if year_part.len() == 4 && year_part.bytes().all(|b| b.is_ascii_digit()) {
            return year_part.parse().ok();
        }

        None
    }
}

impl From<&str> for PublishDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PublishDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for PublishDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

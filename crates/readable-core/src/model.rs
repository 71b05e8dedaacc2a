//! Paper records as served by the backend's `/api/papers/{id}` endpoint.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Identifier of a paper (an arXiv id such as `1706.03762` in practice).
///
/// Never empty: blank input maps to "no selection" instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(String);

impl PaperId {
    /// Build an id from user input. Surrounding whitespace is dropped; blank
    /// input yields `None`.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One research paper, pre-structured for reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub paper_id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub publication_year: i32,
    pub keywords: Vec<String>,
    pub citations_count: u64,
    pub pdf_url: String,
    /// Absent (or `null`) for papers that only carry an abstract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Doubles as the navigation key, so it is unique within a paper.
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Display-only; paragraphs render in list order.
    #[serde(rename = "paragraphNum")]
    pub paragraph_num: i64,
    pub content: String,
}

impl Paper {
    /// Sections in display order (empty when the record has none).
    pub fn sections(&self) -> &[Section] {
        self.sections.as_deref().unwrap_or(&[])
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections().iter().find(|s| s.title == title)
    }

    pub fn first_section_title(&self) -> Option<&str> {
        self.sections().first().map(|s| s.title.as_str())
    }

    /// Reject records whose section titles collide, since titles are used as
    /// navigation keys.
    pub fn validate(&self) -> Result<(), FetchError> {
        let mut seen = HashSet::new();
        for section in self.sections() {
            if !seen.insert(section.title.as_str()) {
                return Err(FetchError::MalformedResponse(format!(
                    "duplicate section title \"{}\"",
                    section.title
                )));
            }
        }
        Ok(())
    }
}

/// Body of a successful `/api/papers/{id}` response.
///
/// The backend also sends `status` and `code`; they carry no information the
/// HTTP status line does not already give and are only kept for logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperResponse {
    pub status: Option<String>,
    pub code: Option<u16>,
    pub paper: Option<Paper>,
}

impl PaperResponse {
    /// Extract the paper, failing when the field is missing or invalid.
    pub fn into_paper(self) -> Result<Paper, FetchError> {
        let paper = self.paper.ok_or_else(|| {
            FetchError::MalformedResponse("response has no `paper` field".to_string())
        })?;
        paper.validate()?;
        Ok(paper)
    }
}

use thiserror::Error;

pub mod config_file;
pub mod format;
pub mod loader;
pub mod model;
pub mod selection;
pub mod source;
pub mod view_model;
pub mod viewer;

// Re-export for convenience
pub use loader::{LoadOutcome, PaperLoader};
pub use model::{Paper, PaperId, PaperResponse, Paragraph, Section};
pub use selection::{SelectionHandle, SelectionProvider};
pub use source::{HttpPaperSource, PaperSource};
pub use view_model::{NavEntry, PaperView, SectionView, ViewModel};
pub use viewer::{ABSTRACT_ENTRY, ColorScheme, Effect, Phase, RequestTicket, ViewerState};

/// Fallback shown when a failure carries no usable detail.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch paper data";

/// Why a paper could not be loaded.
///
/// Every variant is caught by the viewer and turned into a user-visible
/// message; none of them escape as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, refused connection, reset).
    #[error("Failed to fetch paper data: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("Failed to fetch paper data: {reason}")]
    Http { status: u16, reason: String },
    /// The body was not JSON, had no `paper` field, or broke a model invariant.
    #[error("Malformed paper response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Human-readable message for the error alert.
    pub fn user_message(&self) -> String {
        let detail = match self {
            FetchError::Network(d) | FetchError::MalformedResponse(d) => d.as_str(),
            FetchError::Http { reason, .. } => reason.as_str(),
        };
        if detail.trim().is_empty() {
            GENERIC_FETCH_ERROR.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::MalformedResponse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Failed to load context document {}: {source}", path.display())]
    ContextLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Invalid lead: {0}")]
    InvalidLead(String),

    #[error("Lead capture failed: {0}")]
    LeadCapture(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    pub fn context_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ContextLoad {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised by the completion round trip, which leave the
    /// transcript untouched.
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion(_) | Self::Http(_) | Self::Json(_))
    }

    /// True for validation and delivery errors from the CV request flow.
    pub fn is_lead_capture(&self) -> bool {
        matches!(self, Self::InvalidLead(_) | Self::LeadCapture(_))
    }
}

use crate::error::ChatError;
use std::path::Path;
use std::sync::Arc;

/// The two static background documents injected into every prompt.
///
/// Loaded once when a session starts and shared read-only afterwards; clones
/// are cheap and point at the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocuments {
    summary: Arc<str>,
    profile: Arc<str>,
}

impl ContextDocuments {
    pub fn new(summary: impl AsRef<str>, profile: impl AsRef<str>) -> Self {
        Self {
            summary: Arc::from(summary.as_ref().trim()),
            profile: Arc::from(profile.as_ref().trim()),
        }
    }

    /// Read both documents from disk. Either file missing is fatal.
    pub fn load(summary_path: &Path, profile_path: &Path) -> Result<Self, ChatError> {
        let summary = read_document(summary_path)?;
        let profile = read_document(profile_path)?;

        tracing::info!(
            summary = %summary_path.display(),
            profile = %profile_path.display(),
            bytes = summary.len() + profile.len(),
            "loaded context documents"
        );

        Ok(Self::new(summary, profile))
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}

fn read_document(path: &Path) -> Result<String, ChatError> {
    std::fs::read_to_string(path).map_err(|e| ChatError::context_load(path, e))
}

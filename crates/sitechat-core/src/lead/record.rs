use super::Lead;
use crate::context::Transcript;
use crate::error::ChatError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A lead as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub captured_at: String,
    pub chat: Transcript,
}

/// Writes one JSON file per captured lead, named by capture time and
/// recipient. An existing record is never replaced.
pub struct LeadLog {
    base_dir: PathBuf,
}

impl LeadLog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File name for a lead captured at `stamp` (`YYYYmmdd-HHMMSS`), with an
    /// optional disambiguating suffix.
    fn record_path(&self, stamp: &str, email: &str, suffix: Option<&str>) -> PathBuf {
        let safe_email: String = email
            .replace('@', "_at_")
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        let name = match suffix {
            Some(suffix) => format!("chat_{stamp}_{safe_email}_{suffix}.json"),
            None => format!("chat_{stamp}_{safe_email}.json"),
        };
        self.base_dir.join(name)
    }

    pub async fn write(&self, lead: &Lead, transcript: &Transcript) -> Result<PathBuf, ChatError> {
        fs::create_dir_all(&self.base_dir).await.map_err(|e| {
            ChatError::LeadCapture(format!("Failed to create lead log directory: {}", e))
        })?;

        let now = chrono::Local::now();
        let stamp = now.format("%Y%m%d-%H%M%S").to_string();
        let mut path = self.record_path(&stamp, lead.email(), None);
        // Same recipient within the same second.
        while fs::try_exists(&path).await.unwrap_or(false) {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            path = self.record_path(&stamp, lead.email(), Some(&suffix[..8]));
        }

        let record = LeadRecord {
            name: lead.name().to_string(),
            email: lead.email().to_string(),
            captured_at: now.to_rfc3339(),
            chat: transcript.clone(),
        };
        let contents = serde_json::to_string_pretty(&record).map_err(|e| {
            ChatError::LeadCapture(format!("Failed to serialize lead record: {}", e))
        })?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).await.map_err(|e| {
            ChatError::LeadCapture(format!("Failed to write lead record: {}", e))
        })?;
        fs::rename(&tmp_path, &path).await.map_err(|e| {
            ChatError::LeadCapture(format!("Failed to rename lead record: {}", e))
        })?;

        Ok(path)
    }

    pub async fn load(path: &Path) -> Result<LeadRecord, ChatError> {
        let contents = fs::read_to_string(path).await?;
        serde_json::from_str(&contents).map_err(|e| {
            ChatError::LeadCapture(format!("Failed to parse lead record: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_path_replaces_at_sign() {
        let log = LeadLog::new("logs");
        let path = log.record_path("20260101-120000", "ada@example.com", None);
        assert_eq!(
            path,
            PathBuf::from("logs/chat_20260101-120000_ada_at_example.com.json")
        );
    }

    #[test]
    fn test_record_path_with_suffix() {
        let log = LeadLog::new("logs");
        let path = log.record_path("20260101-120000", "ada@example.com", Some("1a2b3c4d"));
        assert_eq!(
            path,
            PathBuf::from("logs/chat_20260101-120000_ada_at_example.com_1a2b3c4d.json")
        );
    }

    #[test]
    fn test_record_path_cannot_escape_directory() {
        let log = LeadLog::new("logs");
        let path = log.record_path("20260101-120000", "../../etc/passwd@x", None);
        assert_eq!(path.parent(), Some(Path::new("logs")));
    }
}

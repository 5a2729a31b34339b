use super::Lead;
use crate::context::Transcript;
use crate::error::ChatError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The follow-up message sent to a visitor: the chat transcript in the body
/// and the CV as an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

impl CvEmail {
    pub fn compose(persona: &str, from: &str, lead: &Lead, transcript: &Transcript) -> Self {
        Self {
            to: lead.email().to_string(),
            from: from.to_string(),
            subject: format!("Chat with {persona}'s Assistant + CV"),
            body: format!(
                "Thanks for your interest in {persona}!\n\nHere's a transcript of our chat:\n\n{}",
                transcript.render_plain(persona)
            ),
        }
    }
}

/// Outbound mail transport.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Address used in the `From` header.
    fn sender(&self) -> &str;

    async fn send(&self, email: &CvEmail) -> Result<(), ChatError>;
}

#[derive(Debug, Serialize)]
struct OutboxEntry<'a> {
    #[serde(flatten)]
    email: &'a CvEmail,
    attachment: &'a Path,
    attachment_bytes: u64,
    queued_at: String,
}

/// Spools each message as a JSON file into an outbox directory, where a
/// relay with SMTP credentials picks it up.
///
/// The attachment is checked before anything is queued so a missing CV
/// fails the delivery step instead of sending an empty follow-up.
pub struct OutboxMailer {
    outbox_dir: PathBuf,
    attachment: PathBuf,
    sender: String,
}

impl OutboxMailer {
    pub fn new(
        outbox_dir: impl Into<PathBuf>,
        attachment: impl Into<PathBuf>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
            attachment: attachment.into(),
            sender: sender.into(),
        }
    }
}

#[async_trait::async_trait]
impl Mailer for OutboxMailer {
    fn sender(&self) -> &str {
        &self.sender
    }

    async fn send(&self, email: &CvEmail) -> Result<(), ChatError> {
        let metadata = tokio::fs::metadata(&self.attachment).await.map_err(|e| {
            ChatError::LeadCapture(format!(
                "CV attachment {} unreadable: {e}",
                self.attachment.display()
            ))
        })?;

        tokio::fs::create_dir_all(&self.outbox_dir).await?;

        let entry = OutboxEntry {
            email,
            attachment: &self.attachment,
            attachment_bytes: metadata.len(),
            queued_at: chrono::Utc::now().to_rfc3339(),
        };
        let contents = serde_json::to_string_pretty(&entry)?;

        let path = self.outbox_dir.join(format!("{}.json", uuid::Uuid::new_v4()));
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, contents).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::info!(to = %email.to, path = %path.display(), "CV email queued");
        Ok(())
    }
}

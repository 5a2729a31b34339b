use crate::context::{PromptAssembler, Transcript};
use crate::error::ChatError;
use crate::lead::{Lead, LeadCapture, LeadReport};
use crate::llm::LlmClient;
use tracing::Instrument;
use uuid::Uuid;

/// One visitor's conversation: the completion client, the prompt assembler
/// with its loaded context, and the transcript they own.
///
/// A session is a plain value owned by whoever serves the visitor. `respond`
/// takes `&mut self`, so only one request can be in flight per session.
pub struct ChatSession {
    id: Uuid,
    llm: Box<dyn LlmClient>,
    assembler: PromptAssembler,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(llm: Box<dyn LlmClient>, assembler: PromptAssembler) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session = %id, model = llm.model(), "session started");
        Self {
            id,
            llm,
            assembler,
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn persona(&self) -> &str {
        self.assembler.persona()
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Ask one question. On success the exchange is appended to the
    /// transcript and the reply returned; on failure the transcript is
    /// left exactly as it was.
    pub async fn respond(&mut self, user_input: &str) -> Result<String, ChatError> {
        let span = tracing::info_span!("respond", session = %self.id, turn = self.transcript.len());

        async {
            let messages = self.assembler.assemble(&self.transcript, user_input);
            let response = self.llm.chat(&messages).await.map_err(|e| {
                tracing::warn!("completion failed: {e}");
                e
            })?;

            let reply = response.message.content;
            self.transcript.append(user_input, reply.clone());
            tracing::debug!(reply_len = reply.len(), "turn recorded");
            Ok::<_, ChatError>(reply)
        }
        .instrument(span)
        .await
    }

    /// Validate the visitor's details and hand the full transcript to lead
    /// capture. Invalid details never reach `capture`.
    pub async fn capture_lead(
        &self,
        name: &str,
        email: &str,
        capture: &LeadCapture,
    ) -> Result<LeadReport, ChatError> {
        let lead = Lead::new(name, email)?;
        tracing::info!(session = %self.id, email = lead.email(), "capturing lead");
        Ok(capture.capture(&lead, &self.transcript).await)
    }
}

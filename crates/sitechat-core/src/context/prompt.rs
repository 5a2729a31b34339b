use crate::context::{ContextDocuments, Transcript};
use crate::llm::Message;

/// Builds the message list for one completion request: a system message
/// carrying the persona and context documents, the prior turns as
/// alternating user/assistant messages, then the new question.
///
/// Context documents are passed through whole. Oversized prompts are left
/// for the completion API to reject; `with_warn_tokens` only logs.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    persona: String,
    documents: ContextDocuments,
    warn_tokens: Option<usize>,
}

impl PromptAssembler {
    pub fn new(persona: impl Into<String>, documents: ContextDocuments) -> Self {
        Self {
            persona: persona.into(),
            documents,
            warn_tokens: None,
        }
    }

    /// Emit a warning whenever the system prompt alone is estimated above
    /// `tokens`.
    pub fn with_warn_tokens(mut self, tokens: usize) -> Self {
        self.warn_tokens = Some(tokens);
        self
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn documents(&self) -> &ContextDocuments {
        &self.documents
    }

    pub fn system_prompt(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "You are acting as {}'s assistant on their personal site.\n",
            self.persona
        ));
        prompt.push_str(
            "Your job is to answer questions about their background, experience, skills, and projects.\n",
        );
        prompt.push_str(
            "Be warm, insightful, and guide interested visitors to share their name and email for follow-up.\n",
        );
        prompt.push_str("\n## Summary:\n");
        prompt.push_str(self.documents.summary());
        prompt.push_str("\n\n## Profile:\n");
        prompt.push_str(self.documents.profile());
        prompt.push('\n');

        prompt
    }

    pub fn assemble(&self, transcript: &Transcript, user_input: &str) -> Vec<Message> {
        let system = self.system_prompt();

        if let Some(limit) = self.warn_tokens {
            let estimated = system.len() / 4;
            if estimated > limit {
                tracing::warn!(
                    estimated,
                    limit,
                    "system prompt exceeds context budget; sending unmodified"
                );
            }
        }

        let mut messages = Vec::with_capacity(2 * transcript.len() + 2);
        messages.push(Message::system(system));
        for turn in transcript.all() {
            messages.push(Message::user(turn.question()));
            messages.push(Message::assistant(turn.answer()));
        }
        messages.push(Message::user(user_input));
        messages
    }
}

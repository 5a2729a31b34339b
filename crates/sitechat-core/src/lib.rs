pub mod error;
pub mod llm;
pub mod context;
pub mod config;
pub mod session;
pub mod lead;

// Re-export key types
pub use error::ChatError;
pub use llm::{LlmClient, LlmResponse, Message, OpenAIClient, Role, Usage};
pub use context::{ContextDocuments, PromptAssembler, Transcript, Turn};
pub use config::Settings;
pub use session::ChatSession;
pub use lead::{Lead, LeadCapture, LeadLog, LeadReport, Mailer, Notifier};

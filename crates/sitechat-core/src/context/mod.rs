mod transcript;
mod documents;
mod prompt;

pub use transcript::{Transcript, Turn};
pub use documents::ContextDocuments;
pub use prompt::PromptAssembler;

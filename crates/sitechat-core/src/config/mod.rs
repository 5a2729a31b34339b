use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::context::{ContextDocuments, PromptAssembler};
use crate::error::ChatError;
use crate::lead::{LeadCapture, LeadLog, OutboxMailer, PushoverNotifier};
use crate::llm::{LlmClient, OpenAIClient, DEFAULT_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LlmSettings,
    pub persona: PersonaSettings,
    pub context: ContextSettings,
    pub lead: LeadSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSettings {
    /// Whose assistant this is. Appears in the system prompt and outgoing mail.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSettings {
    pub summary_path: PathBuf,
    pub profile_path: PathBuf,
    /// Log a warning when the system prompt is estimated above this many tokens.
    #[serde(default)]
    pub context_warn_tokens: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSettings {
    pub cv_path: PathBuf,
    pub log_dir: PathBuf,
    pub outbox_dir: PathBuf,
    pub sender_email_env: String,
    pub pushover_token_env: String,
    pub pushover_user_env: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings {
                model: DEFAULT_MODEL.to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                base_url: None,
                max_tokens: None,
            },
            persona: PersonaSettings {
                name: "Site Owner".to_string(),
            },
            context: ContextSettings {
                summary_path: PathBuf::from("me/summary.txt"),
                profile_path: PathBuf::from("me/profile.txt"),
                context_warn_tokens: Some(100_000),
            },
            lead: LeadSettings {
                cv_path: PathBuf::from("me/cv.pdf"),
                log_dir: PathBuf::from("logs"),
                outbox_dir: PathBuf::from("outbox"),
                sender_email_env: "SMTP_SENDER_EMAIL".to_string(),
                pushover_token_env: "PUSHOVER_TOKEN".to_string(),
                pushover_user_env: "PUSHOVER_USER".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sitechat")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("ignoring config at {}: {e}", config_path.display()),
            }
        }
        Self::default()
    }

    /// Load from an explicit path. Errors are reported, not defaulted.
    pub fn load_from(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ChatError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ChatError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ChatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the API key from the environment variable specified in settings.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env).ok()
    }

    /// Build the completion client from the current settings.
    pub fn build_llm_client(&self) -> Result<Box<dyn LlmClient>, ChatError> {
        let api_key = self.api_key().ok_or_else(|| {
            ChatError::Config(format!(
                "API key not set: export {} or change llm.api_key_env",
                self.llm.api_key_env
            ))
        })?;

        let mut client = OpenAIClient::new(api_key).with_model(&self.llm.model);
        if let Some(ref url) = self.llm.base_url {
            client = client.with_base_url(url);
        }
        if let Some(max_tokens) = self.llm.max_tokens {
            client = client.with_max_tokens(max_tokens);
        }
        Ok(Box::new(client))
    }

    /// Load the context documents and wrap them in a prompt assembler.
    pub fn build_prompt_assembler(&self) -> Result<PromptAssembler, ChatError> {
        let documents =
            ContextDocuments::load(&self.context.summary_path, &self.context.profile_path)?;
        let mut assembler = PromptAssembler::new(&self.persona.name, documents);
        if let Some(tokens) = self.context.context_warn_tokens {
            assembler = assembler.with_warn_tokens(tokens);
        }
        Ok(assembler)
    }

    /// Wire the three lead-capture steps from settings. Notification is
    /// left out when the Pushover credentials are not in the environment.
    pub fn build_lead_capture(&self) -> LeadCapture {
        let sender = std::env::var(&self.lead.sender_email_env).unwrap_or_default();
        let mailer = OutboxMailer::new(&self.lead.outbox_dir, &self.lead.cv_path, sender);
        let mut capture = LeadCapture::new(
            &self.persona.name,
            Box::new(mailer),
            LeadLog::new(&self.lead.log_dir),
        );

        match (
            std::env::var(&self.lead.pushover_token_env),
            std::env::var(&self.lead.pushover_user_env),
        ) {
            (Ok(token), Ok(user)) => {
                capture = capture.with_notifier(Box::new(PushoverNotifier::new(token, user)));
            }
            _ => tracing::info!("pushover credentials not set; lead notifications disabled"),
        }

        capture
    }
}

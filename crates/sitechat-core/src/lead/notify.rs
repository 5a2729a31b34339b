use crate::error::ChatError;

pub const PUSHOVER_ENDPOINT: &str = "https://api.pushover.net/1/messages.json";

/// Owner-facing alert sent when a new lead arrives.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), ChatError>;
}

pub struct PushoverNotifier {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    user: String,
}

impl PushoverNotifier {
    pub fn new(token: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: PUSHOVER_ENDPOINT.to_string(),
            token: token.into(),
            user: user.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait::async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, message: &str) -> Result<(), ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("token", self.token.as_str()),
                ("user", self.user.as_str()),
                ("message", message),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChatError::LeadCapture(format!(
                "Pushover error ({}): {}",
                status, text
            )));
        }
        Ok(())
    }
}

//! Visitor follow-up: when someone leaves their name and email, send them
//! the CV with a copy of the chat, keep a record of the lead, and ping the
//! site owner.
//!
//! The three steps are independent. Each one runs regardless of how the
//! others went, nothing is rolled back, and nothing is retried.

mod record;
mod mail;
mod notify;

pub use record::{LeadLog, LeadRecord};
pub use mail::{CvEmail, Mailer, OutboxMailer};
pub use notify::{Notifier, PushoverNotifier, PUSHOVER_ENDPOINT};

use crate::context::Transcript;
use crate::error::ChatError;
use std::fmt;
use std::path::PathBuf;

/// A visitor's contact details. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    name: String,
    email: String,
}

impl Lead {
    pub fn new(name: &str, email: &str) -> Result<Self, ChatError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(ChatError::InvalidLead(
                "Please enter both your name and email.".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStep {
    Delivery,
    Record,
    Notification,
}

impl fmt::Display for LeadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivery => write!(f, "email delivery"),
            Self::Record => write!(f, "lead record"),
            Self::Notification => write!(f, "notification"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped,
    Failed(String),
}

impl StepOutcome {
    fn from_result<T>(result: &Result<T, ChatError>) -> Self {
        match result {
            Ok(_) => Self::Completed,
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What happened to each step of one capture.
#[derive(Debug, Clone)]
pub struct LeadReport {
    pub delivery: StepOutcome,
    pub record: StepOutcome,
    pub record_path: Option<PathBuf>,
    pub notification: StepOutcome,
}

impl LeadReport {
    pub fn failures(&self) -> Vec<(LeadStep, &str)> {
        [
            (LeadStep::Delivery, &self.delivery),
            (LeadStep::Record, &self.record),
            (LeadStep::Notification, &self.notification),
        ]
        .into_iter()
        .filter_map(|(step, outcome)| match outcome {
            StepOutcome::Failed(reason) => Some((step, reason.as_str())),
            _ => None,
        })
        .collect()
    }

    pub fn is_success(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn into_result(self) -> Result<(), ChatError> {
        let failures = self.failures();
        if failures.is_empty() {
            return Ok(());
        }
        let detail = failures
            .iter()
            .map(|(step, reason)| format!("{step}: {reason}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ChatError::LeadCapture(detail))
    }
}

pub struct LeadCapture {
    persona: String,
    mailer: Box<dyn Mailer>,
    log: LeadLog,
    notifier: Option<Box<dyn Notifier>>,
}

impl LeadCapture {
    pub fn new(persona: impl Into<String>, mailer: Box<dyn Mailer>, log: LeadLog) -> Self {
        Self {
            persona: persona.into(),
            mailer,
            log,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub async fn capture(&self, lead: &Lead, transcript: &Transcript) -> LeadReport {
        let email = CvEmail::compose(&self.persona, self.mailer.sender(), lead, transcript);
        let delivery = self.mailer.send(&email).await;
        if let Err(ref e) = delivery {
            tracing::error!(email = lead.email(), "CV delivery failed: {e}");
        }

        let record = self.log.write(lead, transcript).await;
        match record {
            Ok(ref path) => tracing::info!(path = %path.display(), "lead recorded"),
            Err(ref e) => tracing::error!(email = lead.email(), "lead record failed: {e}"),
        }

        let notification = match self.notifier {
            Some(ref notifier) => {
                let message = format!(
                    "New lead: {} ({}) interacted with the assistant.",
                    lead.name(),
                    lead.email()
                );
                let result = notifier.notify(&message).await;
                if let Err(ref e) = result {
                    tracing::warn!("lead notification failed: {e}");
                }
                StepOutcome::from_result(&result)
            }
            None => StepOutcome::Skipped,
        };

        LeadReport {
            delivery: StepOutcome::from_result(&delivery),
            record: StepOutcome::from_result(&record),
            record_path: record.ok(),
            notification,
        }
    }
}

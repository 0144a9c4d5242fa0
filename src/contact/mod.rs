//! Contact form: relay payload, submission state, and the relay client

use serde::Serialize;
use thiserror::Error;

use crate::config::ContactConfig;

/// Subject used when the form does not set one
pub const DEFAULT_SUBJECT: &str = "New message from portfolio";

/// Stand-in for an omitted reply address
pub const NO_EMAIL: &str = "(not provided)";

/// JSON body posted to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    #[serde(rename = "_subject")]
    pub subject: String,
    pub message: String,
    pub email: String,
    /// Honeypot field, always empty when sent by a person
    #[serde(rename = "_honey")]
    pub honey: String,
}

impl ContactMessage {
    pub fn new(subject: Option<&str>, message: &str, email: Option<&str>) -> Self {
        let subject = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT);
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(NO_EMAIL);

        Self {
            subject: subject.to_string(),
            message: message.to_string(),
            email: email.to_string(),
            honey: String::new(),
        }
    }
}

/// Observable state of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Sent,
}

impl SubmissionState {
    /// Start a submission; only an idle form can send
    pub fn begin(self) -> Self {
        match self {
            SubmissionState::Idle => SubmissionState::Sending,
            other => other,
        }
    }

    /// Settle a pending submission. Any failure returns the form to idle.
    pub fn settle(self, succeeded: bool) -> Self {
        match self {
            SubmissionState::Sending if succeeded => SubmissionState::Sent,
            SubmissionState::Sending => SubmissionState::Idle,
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Contact form is not configured (contact.endpoint is empty)")]
    NotConfigured,

    #[error("Relay rejected the message with status {0}")]
    Rejected(u16),

    #[error("Relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Form settings rendered into pages
#[derive(Debug, Clone, Serialize)]
pub struct ContactForm {
    pub endpoint: String,
    pub subject: String,
    pub heading: String,
    pub subtext: String,
}

impl ContactForm {
    /// Form with the site-wide subject
    pub fn from_config(config: &ContactConfig) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        Some(Self {
            endpoint: config.endpoint.trim().to_string(),
            subject: config.subject.clone(),
            heading: config.heading.clone(),
            subtext: config.subtext.clone(),
        })
    }

    /// Form replying to one article
    pub fn for_article(config: &ContactConfig, title: &str) -> Option<Self> {
        Self::from_config(config).map(|form| Self {
            subject: format!("Re: {}", title),
            ..form
        })
    }
}

/// Posts contact messages to the configured relay
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(config: &ContactConfig) -> Result<Self, ContactError> {
        if !config.is_enabled() {
            return Err(ContactError::NotConfigured);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim().to_string(),
        })
    }

    /// Send one message. The response body is not inspected.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
        tracing::debug!("Posting contact message to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ContactError::Rejected(status.as_u16()))
        }
    }

    /// Run a full submission and report the settled state
    pub async fn submit(&self, message: &ContactMessage) -> SubmissionState {
        let state = SubmissionState::Idle.begin();
        match self.send(message).await {
            Ok(()) => state.settle(true),
            Err(e) => {
                tracing::warn!("Contact message not sent: {}", e);
                state.settle(false)
            }
        }
    }
}

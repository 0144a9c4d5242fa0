//! Send a message through the configured contact relay

use anyhow::Result;

use crate::contact::{ContactMessage, RelayClient, SubmissionState};
use crate::Folio;

/// Send one message and report whether it went through
pub async fn run(
    folio: &Folio,
    message: &str,
    email: Option<&str>,
    subject: Option<&str>,
) -> Result<SubmissionState> {
    if message.trim().is_empty() {
        anyhow::bail!("Message must not be empty");
    }

    let subject = subject.or(Some(folio.config.contact.subject.as_str()));
    let client = RelayClient::new(&folio.config.contact)?;
    let payload = ContactMessage::new(subject, message, email);

    Ok(client.submit(&payload).await)
}

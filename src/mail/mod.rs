pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SenderNames;
use crate::forms::RenderedMail;

pub use smtp::SmtpTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBody {
    Html(String),
    Text(String),
}

/// A fully addressed message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub body: MailBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub message_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Transport(String),
}

/// Outbound mail capability. One instance is shared by every request.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<SentMessage, MailError>;

    /// Check that the relay accepts a connection and our credentials.
    async fn verify(&self) -> Result<(), MailError>;
}

/// Mailer addressing messages on behalf of the configured account
#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    account: String,
    senders: SenderNames,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>, account: String, senders: SenderNames) -> Self {
        Self {
            transport,
            account,
            senders,
        }
    }

    /// Address that sends all mail and receives operator notifications.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Send a notification to the operator's own mailbox
    pub async fn notify_operator(&self, mail: RenderedMail) -> Result<SentMessage, MailError> {
        let message = OutboundMessage {
            from_name: self.senders.contact.clone(),
            from_address: self.account.clone(),
            to: self.account.clone(),
            subject: mail.subject,
            body: MailBody::Html(mail.html),
        };
        self.transport.send(message).await
    }

    /// Send a confirmation to the person who submitted the form
    pub async fn confirm_submitter(
        &self,
        to: &str,
        mail: RenderedMail,
    ) -> Result<SentMessage, MailError> {
        let message = OutboundMessage {
            from_name: self.senders.brand.clone(),
            from_address: self.account.clone(),
            to: to.to_string(),
            subject: mail.subject,
            body: MailBody::Html(mail.html),
        };
        self.transport.send(message).await
    }

    /// Fixed plain-text message to the operator, used to check delivery end to end
    pub async fn send_test(&self) -> Result<SentMessage, MailError> {
        let message = OutboundMessage {
            from_name: self.senders.brand.clone(),
            from_address: self.account.clone(),
            to: self.account.clone(),
            subject: "Test Email from Server".to_string(),
            body: MailBody::Text("Your email system is working 🚀".to_string()),
        };
        self.transport.send(message).await
    }

    pub async fn verify(&self) -> Result<(), MailError> {
        self.transport.verify().await
    }
}

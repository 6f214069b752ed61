use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use super::{MailBody, MailError, MailTransport, OutboundMessage, SentMessage};
use crate::config::SmtpConfig;

/// SMTP relay client backed by lettre's pooled async transport.
#[derive(Clone)]
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let tls_parameters = TlsParameters::new(config.host.clone())
            .map_err(|e| MailError::Transport(format!("TLS setup failed: {}", e)))?;

        let tls = if config.implicit_tls {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let inner = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.clone())
            .port(config.port)
            .tls(tls)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { inner })
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, message: OutboundMessage) -> Result<SentMessage, MailError> {
        let (email, message_id) = build_message(message)?;

        self.inner
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(SentMessage { message_id })
    }

    async fn verify(&self) -> Result<(), MailError> {
        match self.inner.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailError::Transport(
                "SMTP server did not accept the connection".to_string(),
            )),
            Err(e) => Err(MailError::Transport(e.to_string())),
        }
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.trim()
        .parse()
        .map_err(|_| MailError::InvalidAddress(raw.to_string()))
}

/// Build the wire message and the `Message-ID` it carries.
fn build_message(message: OutboundMessage) -> Result<(Message, String), MailError> {
    let from_address = parse_address(&message.from_address)?;
    let message_id = format!("<{}@{}>", Uuid::new_v4(), from_address.domain());
    let from = Mailbox::new(Some(message.from_name), from_address);
    let to = Mailbox::new(None, parse_address(&message.to)?);

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject)
        .message_id(Some(message_id.clone()));

    let email = match message.body {
        MailBody::Html(html) => builder.header(ContentType::TEXT_HTML).body(html),
        MailBody::Text(text) => builder.header(ContentType::TEXT_PLAIN).body(text),
    }
    .map_err(|e| MailError::Build(e.to_string()))?;

    Ok((email, message_id))
}

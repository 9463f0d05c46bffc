//! Outgoing mail transport.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    address::AddressError,
    message::{Mailbox, header::ContentType},
    transport::smtp::{self, authentication::Credentials},
};
use mockall::automock;
use thiserror::Error;

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid email address {address:?}")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("failed to build email message")]
    Message(#[source] lettre::error::Error),

    #[error("SMTP delivery failed")]
    Smtp(#[source] smtp::Error),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single email.
    async fn send(&self, email: Email) -> Result<(), MailerError>;
}

/// SMTP relay settings.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl Debug for SmtpSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// STARTTLS SMTP mailer. The authenticated user is also the sender address.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
}

impl Debug for SmtpMailer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SmtpMailer")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build a mailer for the given relay. No connection is opened yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the SMTP user is not a valid address or the relay
    /// cannot be configured.
    pub fn new(settings: SmtpSettings) -> Result<Self, MailerError> {
        let sender = parse_address(&settings.username)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(MailerError::Smtp)?
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(Mailbox::new(Some(email.from_name), self.sender.clone()))
            .to(Mailbox::new(None, parse_address(&email.to)?))
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)
            .map_err(MailerError::Message)?;

        self.transport
            .send(message)
            .await
            .map_err(MailerError::Smtp)?;

        Ok(())
    }
}

fn parse_address(address: &str) -> Result<Address, MailerError> {
    address
        .trim()
        .parse()
        .map_err(|source| MailerError::Address {
            address: address.to_string(),
            source,
        })
}

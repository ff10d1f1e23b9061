// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification dispatch for the Harborlight charity backend.
//!
//! The server drains the notification outbox through the [`Notifier`]
//! trait. The production implementation sends plain-text mail over SMTP;
//! [`NoopNotifier`] is used in tests and when no SMTP settings are
//! configured, so a missing mail server never blocks domain writes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// Errors that can occur while dispatching notifications.
#[derive(Debug)]
pub enum NotifyError {
    /// An SMTP setting is missing or malformed.
    ConfigurationError(String),
    /// A recipient or sender address did not parse.
    InvalidAddress(String),
    /// The message could not be built.
    MessageBuildFailed(String),
    /// The transport rejected the message.
    SendFailed(String),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigurationError(msg) => write!(f, "Notifier configuration error: {msg}"),
            Self::InvalidAddress(msg) => write!(f, "Invalid mail address: {msg}"),
            Self::MessageBuildFailed(msg) => write!(f, "Failed to build message: {msg}"),
            Self::SendFailed(msg) => write!(f, "Failed to send notification: {msg}"),
        }
    }
}

impl std::error::Error for NotifyError {}

/// One notification ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// The recipient address.
    pub recipient: String,
    /// The subject line.
    pub subject: String,
    /// The plain-text body.
    pub body: String,
}

/// The dispatch seam between the outbox drain loop and the outside world.
///
/// Implementations must be safe to call repeatedly with the same message:
/// the outbox delivers at least once, not exactly once.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be delivered; the caller
    /// records the failure and retries later.
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError>;
}

/// SMTP settings, read from the environment by the server.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// The relay host name.
    pub host: String,
    /// The relay port.
    pub port: u16,
    /// The authentication user name.
    pub username: String,
    /// The authentication password.
    pub password: String,
    /// The sender address placed on every message.
    pub from_address: String,
}

/// A [`Notifier`] that sends plain-text mail over SMTP.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    /// Builds the SMTP transport from the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host is not a valid SMTP target.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let credentials: Credentials =
            Credentials::new(config.username.clone(), config.password.clone());

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| {
                    NotifyError::ConfigurationError(format!("Failed to create SMTP transport: {e}"))
                })?
                .port(config.port)
                .credentials(credentials)
                .build();

        info!("SMTP notifier configured for relay {}", config.host);

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        let email: Message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| NotifyError::InvalidAddress(format!("from address: {e}")))?,
            )
            .to(message
                .recipient
                .parse()
                .map_err(|e| NotifyError::InvalidAddress(format!("to address: {e}")))?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| NotifyError::MessageBuildFailed(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        debug!("Notification sent to {}", message.recipient);
        Ok(())
    }
}

/// A [`Notifier`] that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait::async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        debug!(
            "Notification to {} dropped (no notifier configured)",
            message.recipient
        );
        Ok(())
    }
}

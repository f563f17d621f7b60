//! Notification adapters
//!
//! Real delivery (SMTP, push) is provided by the deployment; these adapters
//! cover logging-only and switched-off setups.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{Email, NotificationError, Notifier};

/// Emits every message as a structured log event.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender: String,
}

impl LogNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), NotificationError> {
        info!(
            from = %self.sender,
            to = %to,
            subject,
            body_len = body.len(),
            "Notification dispatched"
        );
        Ok(())
    }
}

/// Drops every message. Used when notifications are turned off.
#[derive(Debug, Clone, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, to: &Email, subject: &str, _body: &str) -> Result<(), NotificationError> {
        debug!(to = %to, subject, "Notifications disabled, message dropped");
        Ok(())
    }
}

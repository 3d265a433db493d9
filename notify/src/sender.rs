use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Invalid submission: {0}")]
    Invalid(String),
    #[error("Please wait {remaining_secs}s before sending another message")]
    Cooldown { remaining_secs: u64 },
    #[error("Relay Error: {0}")]
    Relay(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Sent to the site owner about a new contact message.
    OwnerAlert,
    /// Canned acknowledgement sent back to the visitor.
    AutoReply,
    BookingRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub to_email: String,
    pub to_name: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
    pub fields: BTreeMap<String, String>,
}

/// What happened to an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Sent,
    /// Honeypot was filled; nothing went out.
    Discarded,
}

/// A hosted service that delivers one notification.
pub trait NotificationSender {
    fn send(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), NotifyError> {
    if value.trim().is_empty() {
        return Err(NotifyError::Invalid(format!("{} is required", field)));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), NotifyError> {
    let valid = match value.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(NotifyError::Invalid(format!("{} is not a valid email address", value)))
    }
}

pub(crate) fn honeypot_filled(honeypot: &Option<String>) -> bool {
    honeypot.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_email() {
        assert!(require_email("client@example.com").is_ok());
        assert!(require_email(" client@example.com ").is_ok());
        assert!(require_email("client@localhost").is_err());
        assert!(require_email("@example.com").is_err());
        assert!(require_email("a@b@c.com").is_err());
        assert!(require_email("nobody").is_err());
    }

    #[test]
    fn test_honeypot() {
        assert!(!honeypot_filled(&None));
        assert!(!honeypot_filled(&Some("  ".into())));
        assert!(honeypot_filled(&Some("http://spam".into())));
    }
}

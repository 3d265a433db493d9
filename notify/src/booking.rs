use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::guard::SubmissionGuard;
use crate::sender::{
    honeypot_filled, require, require_email, Delivery, Notification, NotificationKind,
    NotificationSender, NotifyError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub event_type: String,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub details: String,
    #[serde(default, rename = "_gotcha")]
    pub honeypot: Option<String>,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), NotifyError> {
        require(&self.name, "name")?;
        require_email(&self.email)?;
        require(&self.event_type, "event type")
    }

    fn to_notification(&self, owner_email: &str) -> Notification {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), self.name.trim().to_string());
        fields.insert("event_type".to_string(), self.event_type.trim().to_string());
        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            fields.insert("phone".to_string(), phone.to_string());
        }
        if let Some(date) = self.event_date {
            fields.insert("event_date".to_string(), date.format("%Y-%m-%d").to_string());
        }
        Notification {
            kind: NotificationKind::BookingRequest,
            to_email: owner_email.to_string(),
            to_name: String::new(),
            reply_to: self.email.trim().to_string(),
            subject: format!("Booking request: {}", self.event_type.trim()),
            body: self.details.clone(),
            fields,
        }
    }
}

/// Booking form flow, delivered through the generic form relay.
#[derive(Debug)]
pub struct BookingDesk<S> {
    sender: S,
    owner_email: String,
    guard: SubmissionGuard,
}

impl<S: NotificationSender + Sync> BookingDesk<S> {
    pub fn new(sender: S, owner_email: String, cooldown: Duration) -> Self {
        BookingDesk {
            sender,
            owner_email,
            guard: SubmissionGuard::new(cooldown),
        }
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self, request)))]
    pub async fn submit(&self, client: &str, request: BookingRequest) -> Result<Delivery, NotifyError> {
        if honeypot_filled(&request.honeypot) {
            tracing::info!(client, "Discarding booking request with filled honeypot");
            return Ok(Delivery::Discarded);
        }
        request.validate()?;
        self.guard.try_begin(client, Instant::now())?;

        let notification = request.to_notification(&self.owner_email);
        if let Err(e) = self.sender.send(&notification).await {
            self.guard.release(client);
            return Err(e);
        }

        self.guard.complete(client, Instant::now());
        tracing::info!(client, event_type = %request.event_type, "Booking request delivered");
        Ok(Delivery::Sent)
    }
}

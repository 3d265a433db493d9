use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::guard::SubmissionGuard;
use crate::sender::{
    honeypot_filled, require, require_email, Delivery, Notification, NotificationKind,
    NotificationSender, NotifyError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactSubject {
    #[serde(rename = "Booking Inquiry")]
    BookingInquiry,
    #[serde(rename = "Commercial Licensing")]
    CommercialLicensing,
    #[serde(rename = "Image Takedown Request")]
    ImageTakedownRequest,
    #[serde(rename = "Other")]
    Other,
}

impl ContactSubject {
    pub const ALL: [ContactSubject; 4] = [
        ContactSubject::BookingInquiry,
        ContactSubject::CommercialLicensing,
        ContactSubject::ImageTakedownRequest,
        ContactSubject::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactSubject::BookingInquiry => "Booking Inquiry",
            ContactSubject::CommercialLicensing => "Commercial Licensing",
            ContactSubject::ImageTakedownRequest => "Image Takedown Request",
            ContactSubject::Other => "Other",
        }
    }

    /// Canned body of the acknowledgement sent back to the visitor.
    pub fn auto_reply(self) -> &'static str {
        match self {
            ContactSubject::BookingInquiry => {
                "Thanks for reaching out about a session! I check availability against \
                 my calendar and will get back to you within 48 hours with open dates \
                 and package details."
            }
            ContactSubject::CommercialLicensing => {
                "Thanks for your interest in licensing my work. I will follow up with \
                 usage terms and pricing once I have reviewed which images you would \
                 like to use."
            }
            ContactSubject::ImageTakedownRequest => {
                "Your takedown request has been received. Requested images are hidden \
                 from the public galleries as soon as possible, usually within 24 hours. \
                 No further action is needed on your side."
            }
            ContactSubject::Other => {
                "Thanks for your message! I read everything that comes in and will \
                 reply as soon as I can."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
    /// Hidden field real visitors leave empty.
    #[serde(default, rename = "_gotcha")]
    pub honeypot: Option<String>,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), NotifyError> {
        require(&self.name, "name")?;
        require_email(&self.email)?;
        require(&self.message, "message")
    }
}

/// Contact form flow: owner alert plus a subject-dependent auto-reply.
#[derive(Debug)]
pub struct ContactDesk<S> {
    sender: S,
    owner_email: String,
    owner_name: String,
    guard: SubmissionGuard,
}

impl<S: NotificationSender + Sync> ContactDesk<S> {
    pub fn new(sender: S, owner_email: String, owner_name: String, cooldown: Duration) -> Self {
        ContactDesk {
            sender,
            owner_email,
            owner_name,
            guard: SubmissionGuard::new(cooldown),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.guard.cooldown()
    }

    fn owner_alert(&self, message: &ContactMessage) -> Notification {
        let mut fields = BTreeMap::new();
        fields.insert("from_name".to_string(), message.name.trim().to_string());
        fields.insert("from_email".to_string(), message.email.trim().to_string());
        Notification {
            kind: NotificationKind::OwnerAlert,
            to_email: self.owner_email.clone(),
            to_name: self.owner_name.clone(),
            reply_to: message.email.trim().to_string(),
            subject: message.subject.label().to_string(),
            body: message.message.clone(),
            fields,
        }
    }

    fn auto_reply(&self, message: &ContactMessage) -> Notification {
        let mut fields = BTreeMap::new();
        fields.insert("from_name".to_string(), self.owner_name.clone());
        fields.insert("original_message".to_string(), message.message.clone());
        Notification {
            kind: NotificationKind::AutoReply,
            to_email: message.email.trim().to_string(),
            to_name: message.name.trim().to_string(),
            reply_to: self.owner_email.clone(),
            subject: format!("Re: {}", message.subject.label()),
            body: message.subject.auto_reply().to_string(),
            fields,
        }
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        self.sender.send(&self.owner_alert(message)).await?;
        self.sender.send(&self.auto_reply(message)).await
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self, message)))]
    pub async fn submit(&self, client: &str, message: ContactMessage) -> Result<Delivery, NotifyError> {
        if honeypot_filled(&message.honeypot) {
            tracing::info!(client, "Discarding contact message with filled honeypot");
            return Ok(Delivery::Discarded);
        }
        message.validate()?;
        self.guard.try_begin(client, Instant::now())?;

        if let Err(e) = self.deliver(&message).await {
            self.guard.release(client);
            return Err(e);
        }

        self.guard.complete(client, Instant::now());
        tracing::info!(client, subject = message.subject.label(), "Contact message delivered");
        Ok(Delivery::Sent)
    }
}

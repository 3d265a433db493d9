//! Hosted transactional-email relay.

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::sender::{Notification, NotificationKind, NotificationSender, NotifyError};

pub const DEFAULT_EMAIL_RELAY_URL: &str = "https://api.emailjs.com";
const SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Clone, Default)]
pub struct EmailRelayConfig {
    pub base_url: String,
    pub service_id: String,
    pub notify_template: String,
    pub reply_template: String,
    pub public_key: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct EmailRelay {
    client: reqwest::Client,
    config: EmailRelayConfig,
}

impl EmailRelay {
    pub fn new(config: EmailRelayConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(mut config: EmailRelayConfig, client: reqwest::Client) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        EmailRelay { client, config }
    }

    fn template_for(&self, kind: NotificationKind) -> &str {
        match kind {
            NotificationKind::AutoReply => &self.config.reply_template,
            NotificationKind::OwnerAlert | NotificationKind::BookingRequest => {
                &self.config.notify_template
            }
        }
    }

    fn template_params(notification: &Notification) -> Map<String, Value> {
        let mut params = Map::new();
        for (key, value) in &notification.fields {
            params.insert(key.clone(), Value::String(value.clone()));
        }
        params.insert("to_email".into(), notification.to_email.clone().into());
        params.insert("to_name".into(), notification.to_name.clone().into());
        params.insert("reply_to".into(), notification.reply_to.clone().into());
        params.insert("subject".into(), notification.subject.clone().into());
        params.insert("message".into(), notification.body.clone().into());
        params
    }
}

impl NotificationSender for EmailRelay {
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let url = format!("{}{}", self.config.base_url, SEND_PATH);
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: self.template_for(notification.kind),
            user_id: &self.config.public_key,
            template_params: Self::template_params(notification),
        };

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Relay(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(%status, kind = ?notification.kind, "Email relay rejected message");
            return Err(NotifyError::Relay(format!("{}: {}", status, error_text)));
        }

        tracing::info!(kind = ?notification.kind, "Email relay accepted message");
        Ok(())
    }
}

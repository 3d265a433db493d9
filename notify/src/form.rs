//! Generic hosted form relay. Only success or failure comes back.

use reqwest::header::ACCEPT;
use serde_json::{Map, Value};

use crate::sender::{Notification, NotificationSender, NotifyError};

#[derive(Debug, Clone)]
pub struct FormRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl FormRelay {
    pub fn new(endpoint: String) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: String, client: reqwest::Client) -> Self {
        FormRelay { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl NotificationSender for FormRelay {
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut body = Map::new();
        for (key, value) in &notification.fields {
            body.insert(key.clone(), Value::String(value.clone()));
        }
        body.insert("email".into(), notification.reply_to.clone().into());
        body.insert("_replyto".into(), notification.reply_to.clone().into());
        body.insert("_subject".into(), notification.subject.clone().into());
        body.insert("message".into(), notification.body.clone().into());

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Relay(e.to_string()))?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Form relay rejected submission");
            return Err(NotifyError::Relay(format!(
                "form relay returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

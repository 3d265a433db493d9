use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use notify::NotifyError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("{0}")]
    Invalid(String),

    #[error("Please wait {remaining_secs} seconds before sending another message")]
    Cooldown { remaining_secs: u64 },

    #[error("Message could not be delivered, please try again later")]
    Relay(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<NotifyError> for SiteError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::Invalid(msg) => SiteError::Invalid(msg),
            NotifyError::Cooldown { remaining_secs } => SiteError::Cooldown { remaining_secs },
            NotifyError::Relay(msg) => SiteError::Relay(msg),
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = match self {
            SiteError::Invalid(_) | SiteError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            SiteError::Cooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            SiteError::Relay(ref detail) => {
                tracing::error!(detail = %detail, "Relay delivery failed");
                StatusCode::BAD_GATEWAY
            }
        };

        let body = Json(json!({ "status": "error", "message": self.to_string() }));
        let mut response = (status, body).into_response();
        if let SiteError::Cooldown { remaining_secs } = self {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(remaining_secs));
        }
        response
    }
}

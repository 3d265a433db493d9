//! Client for the media CDN's image listing and delivery endpoints.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://res.cloudinary.com";

const DELIVERY_TRANSFORM: &str = "f_auto,q_auto";
const BLUR_TRANSFORM: &str = "w_40,e_blur:1000,q_1";

/// One image record from a tag listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Resource {
    pub public_id: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResourcesResponse {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Debug, Error)]
pub enum CdnClientError {
    #[error("Request Error: {0}")]
    RequestError(String),
    #[error("CDN Error: status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed Listing: {0}")]
    MalformedListing(String),
}

#[derive(Debug, Clone)]
pub struct CdnClient {
    client: reqwest::Client,
    cloud_name: String,
    base_url: String,
    delivery_base_url: String,
}

impl CdnClient {
    pub fn new(cloud_name: String) -> Self {
        Self::with_base_url(cloud_name, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom listing host. Mainly used for testing.
    pub fn with_base_url(cloud_name: String, base_url: String) -> Self {
        Self::with_client(cloud_name, base_url, reqwest::Client::new())
    }

    pub fn with_client(cloud_name: String, base_url: String, client: reqwest::Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        CdnClient {
            client,
            cloud_name,
            delivery_base_url: base_url.clone(),
            base_url,
        }
    }

    /// Serve delivery URLs from a different host than the listing endpoint.
    pub fn with_delivery_base(mut self, delivery_base_url: String) -> Self {
        self.delivery_base_url = delivery_base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    pub fn listing_url(&self, tag: &str) -> String {
        format!("{}/{}/image/list/{}.json", self.base_url, self.cloud_name, tag)
    }

    /// Delivery URL with format and quality negotiation left to the CDN.
    pub fn delivery_url(&self, public_id: &str) -> String {
        format!(
            "{}/{}/image/upload/{}/{}",
            self.delivery_base_url, self.cloud_name, DELIVERY_TRANSFORM, public_id
        )
    }

    /// Tiny blurred variant used as a loading placeholder.
    pub fn blur_url(&self, public_id: &str) -> String {
        format!(
            "{}/{}/image/upload/{}/{}",
            self.delivery_base_url, self.cloud_name, BLUR_TRANSFORM, public_id
        )
    }

    /// List every image carrying `tag`. A single request, never retried.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Resource>, CdnClientError> {
        let url = self.listing_url(tag);
        let cache_buster = Utc::now().timestamp_millis().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("cb", cache_buster.as_str())])
            .send()
            .await
            .map_err(|e| CdnClientError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CdnClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CdnClientError::RequestError(e.to_string()))?;
        let listing: ListResourcesResponse = serde_json::from_str(&body)
            .map_err(|e| CdnClientError::MalformedListing(e.to_string()))?;

        tracing::debug!(tag, count = listing.resources.len(), "Fetched tag listing");
        Ok(listing.resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_response() {
        let json = r#"{
            "resources": [
                {
                    "public_id": "jrotc/raider-county/IMG_0042",
                    "version": 1712000000,
                    "format": "jpg",
                    "width": 4000,
                    "height": 3000,
                    "type": "upload",
                    "created_at": "2025-03-01T12:00:00Z"
                },
                { "public_id": "jrotc/loose_shot" }
            ],
            "updated_at": "2025-03-02T00:00:00Z"
        }"#;

        let parsed: ListResourcesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.resources.len(), 2);
        assert_eq!(parsed.resources[0].public_id, "jrotc/raider-county/IMG_0042");
        assert_eq!(parsed.resources[0].width, Some(4000));
        assert_eq!(parsed.resources[1].height, None);
    }

    #[test]
    fn test_missing_resources_array_is_empty() {
        let parsed: ListResourcesResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.resources.is_empty());
    }

    #[test]
    fn test_delivery_urls() {
        let client = CdnClient::new("demo".into());
        assert_eq!(
            client.delivery_url("sports/game_1"),
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto/sports/game_1"
        );
        assert_eq!(
            client.blur_url("sports/game_1"),
            "https://res.cloudinary.com/demo/image/upload/w_40,e_blur:1000,q_1/sports/game_1"
        );
    }

    #[test]
    fn test_separate_delivery_host() {
        let client = CdnClient::with_base_url("demo".into(), "http://127.0.0.1:9/".into())
            .with_delivery_base("https://img.example.com".into());
        assert_eq!(
            client.listing_url("jrotc"),
            "http://127.0.0.1:9/demo/image/list/jrotc.json"
        );
        assert!(client
            .delivery_url("a")
            .starts_with("https://img.example.com/demo/image/upload/"));
    }
}

use crate::domain::model::RawCarrierPayload;
use crate::domain::ports::TrackingProvider;
use crate::utils::error::{Result, TrackingError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.trackingmore.com/v4";
const API_KEY_HEADER: &str = "Tracking-Api-Key";

#[derive(Debug, Deserialize)]
struct ProviderMeta {
    code: i64,
    #[serde(default)]
    message: String,
}

/// `{meta: {code, message}, data: [...]}`
#[derive(Debug, Deserialize)]
struct ProviderEnvelope {
    meta: ProviderMeta,
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// TrackingMore v4 REST client.
pub struct TrackingMoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TrackingMoreClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dakdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn map_status_error(status: StatusCode, body: &str) -> TrackingError {
    match status {
        StatusCode::UNAUTHORIZED => TrackingError::UpstreamAuthFailure,
        StatusCode::NOT_FOUND => TrackingError::UpstreamNotFound {
            message: "Tracking number not found".to_string(),
        },
        _ => {
            tracing::debug!("Provider error body: {}", body);
            TrackingError::UpstreamUnavailable {
                message: format!("tracking service returned HTTP {}", status.as_u16()),
            }
        }
    }
}

#[async_trait]
impl TrackingProvider for TrackingMoreClient {
    async fn create_tracking(
        &self,
        tracking_number: &str,
        courier_code: &str,
    ) -> Result<serde_json::Value> {
        let payload = serde_json::json!({
            "tracking_number": tracking_number,
            "courier_code": courier_code,
        });

        let response = self
            .client
            .post(self.endpoint("trackings/create"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Create tracking response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }
        Ok(response.json().await?)
    }

    async fn get_tracking(
        &self,
        tracking_number: &str,
        courier_code: &str,
    ) -> Result<RawCarrierPayload> {
        let response = self
            .client
            .get(self.endpoint("trackings/get"))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("tracking_numbers", tracking_number),
                ("courier_code", courier_code),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Get tracking response status: {}", status);
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        let body = response.text().await?;
        let envelope: ProviderEnvelope =
            serde_json::from_str(&body).map_err(|e| TrackingError::NormalizationDefect {
                message: format!("unexpected response envelope: {}", e),
            })?;

        if envelope.meta.code != 200 {
            let message = if envelope.meta.message.is_empty() {
                "Unknown error".to_string()
            } else {
                envelope.meta.message
            };
            return Err(TrackingError::UpstreamNotFound { message });
        }

        envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(RawCarrierPayload::new)
            .ok_or_else(|| TrackingError::NoDataYet {
                tracking_number: tracking_number.to_string(),
            })
    }
}

//! HTTP transport against a remote negotiation endpoint

use super::wire::{NegotiateReply, NegotiateRequest, ResetRequest};
use super::NegotiationTransport;
use crate::error::{HaggleError, Result};
use crate::types::SessionId;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// JSON-over-HTTP transport speaking to `{base_url}/negotiate` and
/// `{base_url}/reset`
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HaggleError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn classify_send_error(e: reqwest::Error) -> HaggleError {
        if e.is_timeout() {
            HaggleError::Connection(format!("Request timed out: {}", e))
        } else if e.is_connect() {
            HaggleError::Connection(format!("Connection failed: {}", e))
        } else {
            HaggleError::Connection(e.to_string())
        }
    }
}

#[async_trait]
impl NegotiationTransport for HttpTransport {
    async fn negotiate(&self, request: &NegotiateRequest) -> Result<NegotiateReply> {
        let response = self
            .client
            .post(self.endpoint("negotiate"))
            .json(request)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HaggleError::Connection(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(HaggleError::RemoteStatus {
                status: status.as_u16(),
                detail: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            HaggleError::MalformedReply(format!("Failed to parse reply: {} - body: {}", e, body))
        })
    }

    async fn reset(&self, session_id: &SessionId) -> Result<()> {
        let request = ResetRequest {
            session_id: session_id.clone(),
        };

        let response = self
            .client
            .post(self.endpoint("reset"))
            .json(&request)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HaggleError::RemoteStatus {
                status: status.as_u16(),
                detail: body,
            });
        }

        Ok(())
    }
}

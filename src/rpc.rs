//! HTTPS transport for signed JSON-RPC calls.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{Result, TradeError};
use crate::request::PreparedRequest;
use crate::response::RawResponse;

/// POST transport to the trade endpoint.
///
/// `reqwest::Client` pools connections and gives every in-flight request its
/// own connection, so one `RpcClient` can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
    endpoint: String,
}

impl RpcClient {
    /// Create a new RPC client
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TradeError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_client(endpoint, client)
    }

    /// Create an RPC client with a custom reqwest client
    pub fn with_client(endpoint: &str, client: Client) -> Result<Self> {
        if endpoint.trim().is_empty() {
            return Err(TradeError::Config("Endpoint must not be empty".to_string()));
        }
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one signed request and read back the whole response.
    pub async fn send(&self, request: &PreparedRequest) -> Result<RawResponse> {
        debug!(
            "POST {} method={} id={:?}",
            self.endpoint, request.envelope.method, request.envelope.id
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(request.headers.to_header_map()?)
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await?;

        debug!("{} responded with HTTP {}", request.envelope.method, status.as_u16());

        Ok(RawResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

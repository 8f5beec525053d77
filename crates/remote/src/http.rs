//! HTTP search backend: POSTs the query payload as JSON.
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` to avoid
//! blocking the async runtime.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use paylens_core::QueryPayload;

use crate::error::RemoteError;
use crate::traits::SearchBackend;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:55555/api/payment-records";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Full URL of the search endpoint.
    pub endpoint: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub auth_token: Option<String>,
    /// Upper bound for the whole request, connect to last body byte.
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Backend that runs searches against a remote HTTP endpoint.
pub struct HttpBackend {
    config: HttpConfig,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(config: HttpConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        HttpBackend { config, agent }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn search(&self, payload: &QueryPayload) -> Result<serde_json::Value, RemoteError> {
        let agent = self.agent.clone();
        let endpoint = self.config.endpoint.clone();
        let auth_token = self.config.auth_token.clone();
        let body = payload.clone();

        debug!(endpoint = %endpoint, constraints = body.len(), "sending search request");

        let result = tokio::task::spawn_blocking(move || {
            let mut request = agent.post(&endpoint);
            if let Some(ref token) = auth_token {
                request = request.header("Authorization", &format!("Bearer {}", token));
            }

            let response = request.send_json(&body).map_err(|e| match e {
                ureq::Error::StatusCode(status) => RemoteError::Status {
                    endpoint: endpoint.clone(),
                    status,
                },
                other => RemoteError::Transport {
                    endpoint: endpoint.clone(),
                    message: other.to_string(),
                },
            })?;

            response
                .into_body()
                .read_json::<serde_json::Value>()
                .map_err(|e| {
                    RemoteError::MalformedResponse(format!("body is not valid JSON: {}", e))
                })
        })
        .await
        .map_err(|e| RemoteError::Transport {
            endpoint: self.config.endpoint.clone(),
            message: format!("task join error: {}", e),
        })?;

        if let Err(ref e) = result {
            warn!(error = %e, "search request failed");
        }
        result
    }

    fn backend_id(&self) -> &str {
        "http"
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

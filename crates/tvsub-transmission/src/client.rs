//! Transmission RPC client.

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tvsub_core::AgentHandle;

use crate::endpoint::RpcEndpoint;
use crate::error::{ClientBuildError, TransmissionError, TransmissionResult};
use crate::rpc::{RpcRequest, RpcResponse, SESSION_ID_HEADER};

/// Configuration for the Transmission client.
#[derive(Debug, Clone)]
pub struct TransmissionConfig {
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("tvsub/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransmissionConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Download agent backed by a Transmission daemon.
///
/// The RPC endpoint is supplied per call, so one agent serves whatever
/// endpoint the current settings name. The CSRF session id is cached
/// across calls and refreshed on HTTP 409.
#[derive(Debug)]
pub struct TransmissionAgent {
    http: reqwest::Client,
    session_id: Mutex<Option<String>>,
}

impl TransmissionAgent {
    /// Create an agent with the given configuration.
    pub fn new(config: &TransmissionConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            session_id: Mutex::new(None),
        })
    }

    /// Add the torrent file at `artifact` through the RPC at `endpoint`.
    pub(crate) async fn add_torrent(
        &self,
        endpoint: &str,
        artifact: &Path,
    ) -> TransmissionResult<AgentHandle> {
        let endpoint = RpcEndpoint::parse(endpoint)?;
        let metainfo = STANDARD.encode(tokio::fs::read(artifact).await?);
        let request = RpcRequest::torrent_add(&metainfo);

        let mut refreshed = false;
        loop {
            let response = self.post(&endpoint, &request).await?;
            let status = response.status();

            if status == StatusCode::CONFLICT {
                if refreshed {
                    return Err(TransmissionError::Handshake);
                }
                let session_id = response
                    .headers()
                    .get(SESSION_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(TransmissionError::Handshake)?;
                tracing::debug!("Refreshed Transmission session id");
                *self.session_id.lock().await = Some(session_id.to_string());
                refreshed = true;
                continue;
            }

            if !status.is_success() {
                return Err(TransmissionError::Status(status.as_u16()));
            }

            let body: RpcResponse = response.json().await?;
            return body.into_handle();
        }
    }

    async fn post(
        &self,
        endpoint: &RpcEndpoint,
        request: &RpcRequest<'_>,
    ) -> TransmissionResult<reqwest::Response> {
        let mut builder = self.http.post(endpoint.url.clone()).json(request);
        if let Some(session_id) = self.session_id.lock().await.as_deref() {
            builder = builder.header(SESSION_ID_HEADER, session_id);
        }
        if let Some((user, pass)) = &endpoint.credentials {
            builder = builder.basic_auth(user, Some(pass));
        }
        Ok(builder.send().await?)
    }
}

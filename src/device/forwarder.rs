//! Direct command push to the actuator device
//!
//! The device exposes a single query-parameter interface:
//! `GET /?State=<token>`. One attempt per command, no retry — when the
//! direct push fails the mailbox already guarantees eventual delivery.

use crate::error::{Error, Result};
use std::time::Duration;

/// How long a push may take before it counts as failed.
const FORWARD_TIMEOUT: Duration = Duration::from_secs(4);

/// Issues the direct push request to the actuator device.
pub struct Forwarder {
    client: reqwest::Client,
    base_url: String,
}

impl Forwarder {
    /// Create a forwarder for the given actuator base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FORWARD_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build forwarder client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// URL for a given command token.
    fn command_url(&self, token: &str) -> String {
        format!("{}/?State={}", self.base_url, urlencoding::encode(token))
    }

    /// Push one command to the device.
    ///
    /// A network error, timeout, or non-success status is a
    /// [`Error::Forward`]; the caller decides whether that matters.
    pub async fn send(&self, token: &str) -> Result<()> {
        let url = self.command_url(token);
        let result = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status());

        match result {
            Ok(_) => {
                tracing::debug!(command = %token, "Command forwarded to actuator");
                Ok(())
            }
            Err(e) => {
                tracing::error!(command = %token, error = %e, "Failed to forward command");
                Err(Error::Forward(e.to_string()))
            }
        }
    }

    /// The configured actuator base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

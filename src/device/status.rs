//! Device reachability probing
//!
//! One lightweight GET per device, short timeout, computed fresh on
//! every request. The two probes run concurrently and a failure of one
//! never affects the other's result.

use crate::error::{Error, Result};
use serde::Serialize;
use std::time::Duration;

/// Probe request timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Reachability label for one device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    /// Probe succeeded
    Reachable,
    /// Probe failed (timeout, refused, or error status)
    Unreachable,
    /// Not probed yet
    #[default]
    Unknown,
}

/// Fresh reachability snapshot of both devices.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DeviceStatus {
    pub actuator: Reachability,
    pub camera: Reachability,
}

/// Probes both devices on demand.
pub struct StatusReporter {
    client: reqwest::Client,
    actuator_url: String,
    camera_url: String,
}

impl StatusReporter {
    /// Create a reporter for the two configured base URLs.
    ///
    /// The actuator is probed at its base URL; the camera at its
    /// `/stream` path, the same endpoint the relay targets.
    pub fn new(actuator_url: impl Into<String>, camera_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build probe client: {}", e)))?;
        Ok(Self {
            client,
            actuator_url: actuator_url.into(),
            camera_url: format!("{}/stream", camera_url.into()),
        })
    }

    async fn probe(&self, url: &str) -> Reachability {
        let reachable = self
            .client
            .get(url)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success());
        if reachable {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }

    /// Probe both devices and return a fresh snapshot.
    pub async fn report(&self) -> DeviceStatus {
        let (actuator, camera) = futures::future::join(
            self.probe(&self.actuator_url),
            self.probe(&self.camera_url),
        )
        .await;
        DeviceStatus { actuator, camera }
    }
}

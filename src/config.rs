//! espbridge configuration management
//!
//! All configuration is resolved once at startup (CLI flags with
//! environment fallbacks: `TOKEN`, `ESP8266_IP`, `ESP32CAM_IP`,
//! `SECRET`, `HOST`, `PORT`) and handed to the components that need it.

use serde::{Deserialize, Serialize};

/// Main bridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Device endpoints
    #[serde(default)]
    pub devices: DevicesConfig,

    /// Telegram channel config. `None` disables the chat listener.
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,

    /// Optional shared secret for the `/comando` endpoint.
    /// When set, requests must carry a matching `secret` field.
    #[serde(default)]
    pub shared_secret: Option<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Base URLs of the two devices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicesConfig {
    /// Actuator controller base URL (lights, motors, cooler)
    pub actuator_url: String,

    /// Camera module base URL (serves the MJPEG stream under `/stream`)
    pub camera_url: String,
}

/// Telegram channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token, or the name of an environment variable holding it
    pub bot_token: String,

    /// Allowed user IDs (empty = all allowed)
    #[serde(default)]
    pub allowed_users: Vec<i64>,
}

/// Trim trailing slashes so path concatenation stays predictable.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

//! espbridge - chat and HTTP bridge for an ESP8266 rover and an
//! ESP32-CAM stream.

use anyhow::Result;
use clap::Parser;
use espbridge::config::{BridgeConfig, TelegramConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "espbridge")]
#[command(version)]
#[command(about = "Chat and HTTP bridge for an ESP8266 rover and an ESP32-CAM stream")]
struct Cli {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Actuator controller base URL
    #[arg(long, env = "ESP8266_IP")]
    actuator_url: String,

    /// Camera module base URL
    #[arg(long, env = "ESP32CAM_IP")]
    camera_url: String,

    /// Telegram bot token (omit to disable the chat listener)
    #[arg(long, env = "TOKEN")]
    bot_token: Option<String>,

    /// Shared secret required by POST /comando
    #[arg(long, env = "SECRET")]
    secret: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> BridgeConfig {
        let mut config = BridgeConfig::default();
        config.server.host = self.host;
        config.server.port = self.port;
        config.devices.actuator_url = espbridge::config::normalize_base_url(&self.actuator_url);
        config.devices.camera_url = espbridge::config::normalize_base_url(&self.camera_url);
        config.telegram = self.bot_token.map(|bot_token| TelegramConfig {
            bot_token,
            allowed_users: Vec::new(),
        });
        config.shared_secret = self.secret.filter(|s| !s.is_empty());
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("espbridge={},tower_http=info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    espbridge::bootstrap::run_bridge(cli.into_config()).await
}

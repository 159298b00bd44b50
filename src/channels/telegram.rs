//! Telegram channel adapter
//!
//! Long polling against the Telegram Bot API for incoming updates,
//! plain `sendMessage` calls for replies.
//!
//! API Reference: https://core.telegram.org/bots/api

use super::adapter::{AdapterBase, AdapterStatus, ChannelAdapter, ChannelEvent};
use super::message::{InboundMessage, OutboundMessage};
use crate::config::TelegramConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org/bot";

/// getUpdates long-poll window in seconds.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Telegram channel adapter
pub struct TelegramAdapter {
    config: TelegramConfig,
    base: AdapterBase,
    /// HTTP client for the Bot API
    client: reqwest::Client,
    /// Resolved bot token (from env var or inline config)
    bot_token: Arc<RwLock<Option<String>>>,
    /// Shutdown signal for the poll loop
    shutdown_tx: Arc<RwLock<Option<tokio::sync::watch::Sender<bool>>>>,
}

impl TelegramAdapter {
    /// Create a new Telegram adapter
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            base: AdapterBase::new("telegram"),
            client: reqwest::Client::new(),
            bot_token: Arc::new(RwLock::new(None)),
            shutdown_tx: Arc::new(RwLock::new(None)),
        }
    }

    /// Build API URL for a method
    fn api_url(token: &str, method: &str) -> String {
        format!("{}{}/{}", TELEGRAM_API_BASE, token, method)
    }

    /// Call the Bot API and return the `result` payload
    async fn api_call(&self, method: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let token = self.bot_token.read().await;
        let token = token
            .as_ref()
            .ok_or_else(|| Error::Channel("Telegram bot token not resolved".to_string()))?;

        let url = Self::api_url(token, method);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram API request failed: {}", e)))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Channel(format!("Failed to parse Telegram response: {}", e)))?;

        if !status.is_success() || body.get("ok") != Some(&serde_json::Value::Bool(true)) {
            let description = body["description"].as_str().unwrap_or("unknown error");
            return Err(Error::Channel(format!(
                "Telegram API error ({}): {}",
                status, description
            )));
        }

        Ok(body["result"].clone())
    }

    /// Parse a Telegram update into an [`InboundMessage`].
    ///
    /// Updates from users outside a non-empty allowlist are dropped;
    /// bot-authored messages are kept but flagged so the intake can
    /// skip them (loop prevention).
    fn parse_update(allowed_users: &[i64], update: &serde_json::Value) -> Option<InboundMessage> {
        let message = update.get("message")?;

        let from = message.get("from")?;
        let user_id = from["id"].as_i64()?;

        if !allowed_users.is_empty() && !allowed_users.contains(&user_id) {
            tracing::debug!(user_id, "Telegram user not in allowlist, ignoring");
            return None;
        }

        let chat_id = message.get("chat")?["id"].as_i64()?.to_string();

        let sender_name = [
            from.get("first_name").and_then(|v| v.as_str()),
            from.get("last_name").and_then(|v| v.as_str()),
        ]
        .iter()
        .filter_map(|s| *s)
        .collect::<Vec<_>>()
        .join(" ");

        let text = message
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let mut msg = InboundMessage::new("telegram", &user_id.to_string(), &chat_id, &text);
        msg.channel_message_id = message["message_id"].as_i64().unwrap_or(0).to_string();
        msg.from_bot = from["is_bot"].as_bool().unwrap_or(false);
        if !sender_name.is_empty() {
            msg.sender_name = Some(sender_name);
        }

        Some(msg)
    }

    /// Long polling loop for receiving updates
    async fn poll_loop(
        client: reqwest::Client,
        token: String,
        allowed_users: Vec<i64>,
        event_tx: mpsc::Sender<ChannelEvent>,
        mut shutdown_rx: tokio::sync::watch::Receiver<bool>,
    ) {
        let mut offset: i64 = 0;

        tracing::info!("Telegram long polling started");

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            let url = Self::api_url(&token, "getUpdates");
            let body = serde_json::json!({
                "offset": offset,
                "timeout": POLL_TIMEOUT_SECS,
                "allowed_updates": ["message"]
            });

            let result = tokio::select! {
                resp = client.post(&url).json(&body).send() => resp,
                _ = shutdown_rx.changed() => break,
            };

            match result {
                Ok(resp) => {
                    if let Ok(data) = resp.json::<serde_json::Value>().await {
                        if let Some(updates) = data["result"].as_array() {
                            for update in updates {
                                if let Some(update_id) = update["update_id"].as_i64() {
                                    offset = update_id + 1;
                                }

                                if let Some(msg) = Self::parse_update(&allowed_users, update) {
                                    if event_tx.send(ChannelEvent::Message(msg)).await.is_err() {
                                        tracing::warn!("Event channel closed, stopping poll loop");
                                        return;
                                    }
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Telegram poll error: {}, retrying in 5s", e);
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                }
            }
        }

        tracing::info!("Telegram long polling stopped");
    }
}

#[async_trait]
impl ChannelAdapter for TelegramAdapter {
    fn name(&self) -> &str {
        self.base.name()
    }

    async fn start(&self, event_tx: mpsc::Sender<ChannelEvent>) -> Result<()> {
        self.base.set_status(AdapterStatus::Starting);

        let token = super::resolve_credential(&self.config.bot_token)?;
        *self.bot_token.write().await = Some(token.clone());

        // Verify the token before entering the poll loop
        let me = self
            .api_call("getMe", &serde_json::json!({}))
            .await
            .map_err(|e| Error::Channel(format!("Failed to verify Telegram bot token: {}", e)))?;

        let bot_name = me["username"].as_str().unwrap_or("unknown");
        tracing::info!(bot = bot_name, "Telegram bot authenticated");

        let _ = event_tx
            .send(ChannelEvent::Connected {
                channel: "telegram".to_string(),
            })
            .await;

        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        *self.shutdown_tx.write().await = Some(shutdown_tx);

        tokio::spawn(Self::poll_loop(
            self.client.clone(),
            token,
            self.config.allowed_users.clone(),
            event_tx,
            shutdown_rx,
        ));

        self.base.set_status(AdapterStatus::Running);

        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.base.set_status(AdapterStatus::Stopping);

        if let Some(tx) = self.shutdown_tx.write().await.take() {
            let _ = tx.send(true);
        }

        *self.bot_token.write().await = None;
        self.base.set_status(AdapterStatus::Stopped);

        tracing::info!("Telegram adapter stopped");

        Ok(())
    }

    async fn send_message(&self, message: OutboundMessage) -> Result<String> {
        if !self.base.is_running() {
            return Err(Error::Channel("Telegram adapter not running".to_string()));
        }

        let mut body = serde_json::json!({
            "chat_id": message.chat_id,
            "text": message.content,
        });

        if let Some(ref reply_to) = message.reply_to {
            if let Ok(msg_id) = reply_to.parse::<i64>() {
                body["reply_to_message_id"] = serde_json::Value::Number(msg_id.into());
            }
        }

        let result = self.api_call("sendMessage", &body).await?;

        Ok(result["message_id"].as_i64().unwrap_or(0).to_string())
    }

    fn is_connected(&self) -> bool {
        self.base.is_running()
    }
}

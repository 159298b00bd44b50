//! Message types for channel communication

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inbound message from a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Unique message ID
    pub id: String,
    /// Channel identifier (e.g., "telegram")
    pub channel: String,
    /// Channel-specific message ID
    pub channel_message_id: String,
    /// Sender identifier
    pub sender_id: String,
    /// Sender display name
    pub sender_name: Option<String>,
    /// Chat/conversation ID
    pub chat_id: String,
    /// Message content
    pub content: String,
    /// Whether the sender is a bot (the intake skips these)
    pub from_bot: bool,
    /// Timestamp
    pub timestamp: i64,
}

impl InboundMessage {
    /// Create a new inbound message
    pub fn new(channel: &str, sender_id: &str, chat_id: &str, content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            channel: channel.to_string(),
            channel_message_id: String::new(),
            sender_id: sender_id.to_string(),
            sender_name: None,
            chat_id: chat_id.to_string(),
            content: content.to_string(),
            from_bot: false,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Set sender name
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    /// Mark as authored by a bot
    pub fn from_bot(mut self) -> Self {
        self.from_bot = true;
        self
    }
}

/// Outbound message to send to a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Target channel
    pub channel: String,
    /// Target chat ID
    pub chat_id: String,
    /// Message content
    pub content: String,
    /// Reply to message ID
    pub reply_to: Option<String>,
}

impl OutboundMessage {
    /// Create a new outbound message
    pub fn new(channel: &str, chat_id: &str, content: &str) -> Self {
        Self {
            channel: channel.to_string(),
            chat_id: chat_id.to_string(),
            content: content.to_string(),
            reply_to: None,
        }
    }

    /// Set reply to
    pub fn reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reply_to = Some(message_id.into());
        self
    }

    /// Build a reply to an inbound message.
    pub fn reply(inbound: &InboundMessage, content: &str) -> Self {
        let msg = Self::new(&inbound.channel, &inbound.chat_id, content);
        if inbound.channel_message_id.is_empty() {
            msg
        } else {
            msg.reply_to(inbound.channel_message_id.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_message() {
        let msg = InboundMessage::new("telegram", "user123", "chat456", "f")
            .with_sender_name("John");

        assert_eq!(msg.channel, "telegram");
        assert_eq!(msg.sender_id, "user123");
        assert_eq!(msg.sender_name, Some("John".to_string()));
        assert!(!msg.from_bot);
    }

    #[test]
    fn test_outbound_reply_carries_message_id() {
        let mut inbound = InboundMessage::new("telegram", "user123", "chat456", "f");
        inbound.channel_message_id = "42".to_string();

        let reply = OutboundMessage::reply(&inbound, "✅ Comando enviado: f");
        assert_eq!(reply.chat_id, "chat456");
        assert_eq!(reply.reply_to, Some("42".to_string()));
    }

    #[test]
    fn test_outbound_reply_without_message_id() {
        let inbound = InboundMessage::new("telegram", "user123", "chat456", "f");
        let reply = OutboundMessage::reply(&inbound, "ok");
        assert_eq!(reply.reply_to, None);
    }
}

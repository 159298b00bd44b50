//! Chat command processing
//!
//! The chat-side intake flow: every visible message is a candidate
//! command. Normalize, check membership, push to the actuator, and
//! reply with the outcome. Messages authored by bots are ignored so
//! two bridges in one group cannot feed each other.

use crate::channels::{ChannelAdapter, ChannelEvent, InboundMessage, OutboundMessage};
use crate::command::{normalize, Vocabulary};
use crate::device::Forwarder;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Processes chat messages into actuator commands and replies.
pub struct MessageProcessor {
    vocabulary: Vocabulary,
    forwarder: Arc<Forwarder>,
}

impl MessageProcessor {
    /// Create a processor using the chat vocabulary.
    pub fn new(forwarder: Arc<Forwarder>) -> Self {
        Self {
            vocabulary: Vocabulary::chat(),
            forwarder,
        }
    }

    /// Process one inbound message.
    ///
    /// Returns the reply to send, or `None` when the message should be
    /// ignored entirely (bot author, empty body).
    pub async fn process_message(&self, message: &InboundMessage) -> Option<OutboundMessage> {
        if message.from_bot {
            tracing::debug!(sender = %message.sender_id, "Ignoring bot-authored message");
            return None;
        }

        let candidate = normalize(&message.content);
        if candidate.is_empty() {
            return None;
        }

        if !self.vocabulary.contains(&candidate) {
            return Some(OutboundMessage::reply(
                message,
                &format!("⚠️ Comando no reconocido: {}", candidate),
            ));
        }

        let reply = match self.forwarder.send(&candidate).await {
            Ok(()) => format!("✅ Comando enviado: {}", candidate),
            Err(e) => {
                tracing::error!(command = %candidate, error = %e, "Direct send failed");
                "❌ Error al conectar con ESP8266".to_string()
            }
        };

        Some(OutboundMessage::reply(message, &reply))
    }

    /// Handle a channel event from the event loop.
    pub async fn handle_channel_event(
        &self,
        event: ChannelEvent,
        channels: &HashMap<String, Arc<dyn ChannelAdapter>>,
    ) {
        match event {
            ChannelEvent::Message(message) => {
                tracing::debug!(
                    sender = %message.sender_id,
                    channel = %message.channel,
                    "Received message: {}",
                    message.content
                );

                if let Some(reply) = self.process_message(&message).await {
                    if let Some(channel) = channels.get(&message.channel) {
                        if let Err(e) = channel.send_message(reply).await {
                            tracing::error!(
                                channel = %message.channel,
                                error = %e,
                                "Failed to send reply"
                            );
                        }
                    }
                }
            }
            ChannelEvent::Connected { channel } => {
                tracing::info!("Channel {} connected", channel);
            }
            ChannelEvent::Disconnected { channel, reason } => {
                tracing::warn!("Channel {} disconnected: {}", channel, reason);
            }
            ChannelEvent::Error { channel, error } => {
                tracing::error!("Channel {} error: {}", channel, error);
            }
        }
    }

    /// Drain the channel event stream until every sender is dropped.
    pub async fn run(
        self: Arc<Self>,
        mut event_rx: mpsc::Receiver<ChannelEvent>,
        channels: HashMap<String, Arc<dyn ChannelAdapter>>,
    ) {
        while let Some(event) = event_rx.recv().await {
            self.handle_channel_event(event, &channels).await;
        }
        tracing::info!("Channel event loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn live_actuator() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().route("/", axum::routing::get(|| async { "OK" }));
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        format!("http://{}", addr)
    }

    async fn dead_actuator() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn processor_for(url: String) -> MessageProcessor {
        MessageProcessor::new(Arc::new(Forwarder::new(url).unwrap()))
    }

    #[tokio::test]
    async fn test_bot_messages_are_ignored() {
        let processor = processor_for(dead_actuator().await);
        let message = InboundMessage::new("telegram", "777", "chat", "f").from_bot();
        assert!(processor.process_message(&message).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_messages_are_ignored() {
        let processor = processor_for(dead_actuator().await);
        let message = InboundMessage::new("telegram", "1", "chat", "   ");
        assert!(processor.process_message(&message).await.is_none());
    }

    #[tokio::test]
    async fn test_unrecognized_command_reply() {
        // Validation happens before any network call, so a dead device
        // must not matter here.
        let processor = processor_for(dead_actuator().await);
        let message = InboundMessage::new("telegram", "1", "chat", "dance");
        let reply = processor.process_message(&message).await.unwrap();
        assert_eq!(reply.content, "⚠️ Comando no reconocido: dance");
    }

    #[tokio::test]
    async fn test_valid_command_is_forwarded_and_acknowledged() {
        let processor = processor_for(live_actuator().await);
        let message = InboundMessage::new("telegram", "1", "chat", "  Encender Luces ");
        let reply = processor.process_message(&message).await.unwrap();
        assert_eq!(reply.content, "✅ Comando enviado: encender luces");
    }

    #[tokio::test]
    async fn test_forward_failure_yields_notice_not_error() {
        let processor = processor_for(dead_actuator().await);
        let message = InboundMessage::new("telegram", "1", "chat", "f");
        let reply = processor.process_message(&message).await.unwrap();
        assert_eq!(reply.content, "❌ Error al conectar con ESP8266");
    }

    #[tokio::test]
    async fn test_digits_and_slash_forms_accepted_from_chat() {
        let processor = processor_for(live_actuator().await);
        for token in ["3", "/f"] {
            let message = InboundMessage::new("telegram", "1", "chat", token);
            let reply = processor.process_message(&message).await.unwrap();
            assert_eq!(reply.content, format!("✅ Comando enviado: {}", token));
        }
    }
}

//! Channel adapter trait and common types

use super::message::{InboundMessage, OutboundMessage};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Events from a channel
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// New message received
    Message(InboundMessage),
    /// Channel connected
    Connected { channel: String },
    /// Channel disconnected
    Disconnected { channel: String, reason: String },
    /// Error occurred
    Error { channel: String, error: String },
}

/// Trait for channel adapters
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Get the channel name
    fn name(&self) -> &str;

    /// Start the channel adapter
    async fn start(&self, event_tx: mpsc::Sender<ChannelEvent>) -> Result<()>;

    /// Stop the channel adapter
    async fn stop(&self) -> Result<()>;

    /// Send a message, returning the platform message id
    async fn send_message(&self, message: OutboundMessage) -> Result<String>;

    /// Check if the adapter is connected
    fn is_connected(&self) -> bool;
}

/// Channel adapter status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterStatus {
    /// Not started
    Stopped,
    /// Starting up
    Starting,
    /// Running and connected
    Running,
    /// Stopping
    Stopping,
}

/// Base implementation helper for channel adapters
pub struct AdapterBase {
    name: String,
    status: std::sync::atomic::AtomicU8,
}

impl AdapterBase {
    /// Create a new adapter base
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: std::sync::atomic::AtomicU8::new(AdapterStatus::Stopped as u8),
        }
    }

    /// Get the adapter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current status
    pub fn status(&self) -> AdapterStatus {
        match self.status.load(std::sync::atomic::Ordering::SeqCst) {
            1 => AdapterStatus::Starting,
            2 => AdapterStatus::Running,
            3 => AdapterStatus::Stopping,
            _ => AdapterStatus::Stopped,
        }
    }

    /// Set status
    pub fn set_status(&self, status: AdapterStatus) {
        self.status
            .store(status as u8, std::sync::atomic::Ordering::SeqCst);
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.status() == AdapterStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_base() {
        let base = AdapterBase::new("test");
        assert_eq!(base.name(), "test");
        assert_eq!(base.status(), AdapterStatus::Stopped);

        base.set_status(AdapterStatus::Running);
        assert!(base.is_running());

        base.set_status(AdapterStatus::Stopping);
        assert!(!base.is_running());
    }

    #[test]
    fn test_channel_event() {
        let msg = InboundMessage::new("telegram", "user123", "chat456", "f");
        let event = ChannelEvent::Message(msg);

        assert!(matches!(event, ChannelEvent::Message(_)));
    }
}

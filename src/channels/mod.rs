//! Chat channel adapters
//!
//! The bridge treats the chat platform as a message source and a
//! reply sink; everything platform-specific lives behind the
//! [`ChannelAdapter`] trait.

mod adapter;
mod message;
pub mod supervisor;
mod telegram;

pub use adapter::{AdapterBase, AdapterStatus, ChannelAdapter, ChannelEvent};
pub use message::{InboundMessage, OutboundMessage};
pub use telegram::TelegramAdapter;

/// Resolve a credential reference: try environment variable first, fall
/// back to the inline value.
///
/// Config may hold either an env var name (`"TOKEN"`) or the secret
/// itself.
pub(crate) fn resolve_credential(credential_ref: &str) -> crate::error::Result<String> {
    if let Ok(val) =
        std::env::var(credential_ref).or_else(|_| std::env::var(credential_ref.to_uppercase()))
    {
        return Ok(val);
    }
    if !credential_ref.is_empty() {
        return Ok(credential_ref.to_string());
    }
    Err(crate::error::Error::Channel(format!(
        "Failed to resolve credential: {}",
        credential_ref
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_inline_value() {
        assert_eq!(
            resolve_credential("123:inline-token").unwrap(),
            "123:inline-token"
        );
    }

    #[test]
    fn test_resolve_credential_empty_is_error() {
        assert!(resolve_credential("").is_err());
    }
}

//! Command vocabulary and validation
//!
//! A command is actionable iff it is a member of a fixed token set;
//! membership is exact string match, never prefix or pattern. The chat
//! entry point accepts a wider set than the HTTP endpoint: single-key
//! typing conveniences (`/f`, digits) only make sense when a human types
//! them into a chat, so they stay chat-only.

/// Tokens accepted from the chat listener.
///
/// Chat input is normalized with [`normalize`] before the membership
/// check, so the set only needs the lowercase forms.
const CHAT_COMMANDS: &[&str] = &[
    "f", "b", "l", "r", "i", "g", "j", "h", "s", //
    "/f", "/b", "/l", "/r", "/i", "/g", "/j", "/h", "/s", //
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", //
    "encender luces", "apagar luces", "encender cooler", "apagar cooler",
];

/// Tokens accepted from the HTTP command endpoint, compared as received.
const HTTP_COMMANDS: &[&str] = &[
    "f", "b", "l", "r", "i", "g", "j", "h", "s", //
    "encender luces", "apagar luces", "encender cooler", "apagar cooler",
];

/// A named, closed set of accepted command tokens.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    name: &'static str,
    tokens: &'static [&'static str],
}

impl Vocabulary {
    /// The set accepted by the chat listener.
    pub fn chat() -> Self {
        Self {
            name: "chat",
            tokens: CHAT_COMMANDS,
        }
    }

    /// The set accepted by the HTTP command endpoint.
    pub fn http() -> Self {
        Self {
            name: "http",
            tokens: HTTP_COMMANDS,
        }
    }

    /// Set name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True iff `token` exactly equals a member of this set.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| *t == token)
    }

    /// The tokens in this set.
    pub fn tokens(&self) -> &'static [&'static str] {
        self.tokens
    }
}

/// Normalize a chat message body into a candidate token.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_chat_token_is_valid() {
        let vocab = Vocabulary::chat();
        for token in CHAT_COMMANDS {
            assert!(vocab.contains(token), "chat set must accept {:?}", token);
        }
        assert_eq!(CHAT_COMMANDS.len(), 32);
    }

    #[test]
    fn test_every_http_token_is_valid() {
        let vocab = Vocabulary::http();
        for token in HTTP_COMMANDS {
            assert!(vocab.contains(token), "http set must accept {:?}", token);
        }
        assert_eq!(HTTP_COMMANDS.len(), 13);
    }

    #[test]
    fn test_http_set_is_subset_of_chat_set() {
        let chat = Vocabulary::chat();
        for token in HTTP_COMMANDS {
            assert!(chat.contains(token));
        }
    }

    #[test]
    fn test_digits_and_slash_forms_are_chat_only() {
        let http = Vocabulary::http();
        for token in ["0", "9", "/f", "/s"] {
            assert!(!http.contains(token), "http set must reject {:?}", token);
        }
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        let chat = Vocabulary::chat();
        let http = Vocabulary::http();
        for token in ["", "x", "ff", "10", "//f", "F", "encender", "luces", "encender  luces"] {
            assert!(!chat.contains(token), "chat set must reject {:?}", token);
            assert!(!http.contains(token), "http set must reject {:?}", token);
        }
    }

    #[test]
    fn test_membership_is_exact_not_prefix() {
        let chat = Vocabulary::chat();
        assert!(!chat.contains("f extra"));
        assert!(!chat.contains("encender luces ya"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  F  "), "f");
        assert_eq!(normalize("Encender Luces"), "encender luces");
        assert_eq!(normalize("/S"), "/s");
    }

    #[test]
    fn test_normalized_chat_input_validates() {
        let vocab = Vocabulary::chat();
        assert!(vocab.contains(&normalize(" ENCENDER LUCES ")));
        assert!(vocab.contains(&normalize("F")));
    }
}

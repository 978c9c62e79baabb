//! Shared event contracts for the suggestion surface.
//!
//! This crate defines the formal contracts (DTOs) for events that flow from
//! the clipboard watcher to whatever host surfaces suggestions. Using shared
//! types prevents runtime deserialization errors from mismatched field
//! names.
//!
//! Also provides the `EventBus` trait for decoupled event emission.

mod bus;

pub use bus::{EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus};

use listwise_text::QuoteStyle;
use serde::{Deserialize, Serialize};

/// Event emitted when clipboard text is classified as a list.
///
/// Producers: clipboard watcher
/// Consumers: daemon loop, any suggestion UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestEvent {
    /// The trimmed candidate text.
    pub text: String,
    /// Number of tokens the text split into.
    pub token_count: usize,
    /// Single-quote/SQL-escaped rendering.
    pub single: String,
    /// Double-quote/JSON-escaped rendering.
    pub double: String,
    /// Timestamp in milliseconds since epoch.
    #[serde(default)]
    pub timestamp_ms: Option<i64>,
}

/// Event emitted after a formatted list is written to the clipboard.
///
/// Producers: daemon convert path
/// Consumers: any suggestion UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardWrittenEvent {
    /// Which quoting convention was written.
    pub style: QuoteStyle,
    /// Length of the written string in chars.
    pub chars: usize,
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// List-like clipboard text detected.
    pub const LIST_SUGGESTED: &str = "clipboard:list_suggested";
    /// Formatted list written back to the clipboard.
    pub const LIST_COPIED: &str = "clipboard:list_copied";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_event_round_trip() {
        let event = SuggestEvent {
            text: "a,b".into(),
            token_count: 2,
            single: "'a','b'".into(),
            double: "\"a\",\"b\"".into(),
            timestamp_ms: Some(12345),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SuggestEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.token_count, 2);
        assert_eq!(back.single, "'a','b'");
        assert_eq!(back.timestamp_ms, Some(12345));
    }

    #[test]
    fn test_suggest_event_deserialize_without_timestamp() {
        let json = r#"{"text":"a,b","token_count":2,"single":"'a','b'","double":"\"a\",\"b\""}"#;
        let event: SuggestEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.timestamp_ms, None);
    }

    #[test]
    fn test_clipboard_written_event_style_serializes_lowercase() {
        let event = ClipboardWrittenEvent {
            style: QuoteStyle::Double,
            chars: 9,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["style"], "double");
    }
}

//! Clipboard access and the background watcher.
//!
//! The system clipboard is modeled as an injected capability behind
//! [`ClipboardProvider`], so everything above it - the watcher, the daemon,
//! the tests - is indifferent to where candidate text actually comes from.

mod provider;
mod watcher;

pub use provider::{ClipboardProvider, MemoryClipboard, SystemClipboard};
pub use watcher::{ClipboardWatcher, SuggestCallback, WatcherConfig, DEFAULT_POLL_INTERVAL};

use listwise_detect::ListClassifier;
use listwise_text::{format_list, QuoteStyle};
use listwise_trigger::TriggerController;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard read failed: {0}")]
    Read(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Format `tokens` under `style` and write the result to the clipboard.
///
/// The controller is told about the write before it happens, so the echo of
/// our own copy landing back in the watcher cannot re-trigger a suggestion.
/// Returns the formatted string.
pub fn copy_formatted<P, C>(
    provider: &mut P,
    controller: &mut TriggerController<C>,
    tokens: &[String],
    style: QuoteStyle,
    now: Instant,
) -> Result<String>
where
    P: ClipboardProvider,
    C: ListClassifier,
{
    let formatted = format_list(tokens, style);
    controller.notify_own_clipboard_write(now);
    provider.write_text(&formatted)?;
    tracing::debug!(style = %style, chars = formatted.chars().count(), "wrote formatted list");
    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use listwise_detect::ListDetector;
    use listwise_trigger::TriggerDecision;

    #[test]
    fn test_copy_formatted_writes_and_suppresses() {
        let mut clipboard = MemoryClipboard::default();
        let mut controller = TriggerController::new(ListDetector::new());
        let now = Instant::now();

        let tokens = vec!["A001".to_string(), "A002".to_string()];
        let formatted = copy_formatted(
            &mut clipboard,
            &mut controller,
            &tokens,
            QuoteStyle::Single,
            now,
        )
        .unwrap();

        assert_eq!(formatted, "'A001','A002'");
        assert_eq!(clipboard.read_text().unwrap(), "'A001','A002'");

        // The written text is itself list-like, but the echo must not fire.
        assert_eq!(
            controller.decide(&formatted, now),
            TriggerDecision::Ignore
        );
    }
}

//! Clipboard watcher - background task that polls for new copy events.
//!
//! On a desktop there is no document-wide copy event to listen to; a change
//! in clipboard content is the observable signal that a copy gesture
//! happened. Each observed change is reported to the trigger controller as
//! a gesture and then evaluated as a candidate in the same tick, while the
//! controller keeps its independent gesture/read bookkeeping for hosts that
//! do have two observation channels.

use crate::ClipboardProvider;
use listwise_detect::ListClassifier;
use listwise_events::SuggestEvent;
use listwise_text::{format_list, tokenize, QuoteStyle};
use listwise_trigger::{TriggerController, TriggerDecision};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default polling interval for clipboard changes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Callback type for suggestion events.
pub type SuggestCallback = Arc<dyn Fn(SuggestEvent) + Send + Sync + 'static>;

#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Background poller that feeds clipboard changes through the trigger
/// controller and surfaces accepted candidates as [`SuggestEvent`]s.
pub struct ClipboardWatcher {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Default for ClipboardWatcher {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl ClipboardWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching with the default poll interval.
    pub fn start<P, C>(
        &mut self,
        provider: P,
        controller: TriggerController<C>,
        callback: SuggestCallback,
    ) where
        P: ClipboardProvider + 'static,
        C: ListClassifier + 'static,
    {
        self.start_with_config(provider, controller, callback, WatcherConfig::default());
    }

    /// Start watching with a custom configuration.
    pub fn start_with_config<P, C>(
        &mut self,
        mut provider: P,
        mut controller: TriggerController<C>,
        callback: SuggestCallback,
        config: WatcherConfig,
    ) where
        P: ClipboardProvider + 'static,
        C: ListClassifier + 'static,
    {
        if self.running.load(Ordering::SeqCst) {
            tracing::warn!("ClipboardWatcher already running");
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let handle = std::thread::spawn(move || {
            tracing::info!(interval = ?config.poll_interval, "clipboard watcher started");

            let mut last_seen: Option<String> = None;

            while running.load(Ordering::SeqCst) {
                match provider.read_text() {
                    Ok(text) => {
                        let changed = last_seen.as_deref() != Some(text.as_str());
                        if changed {
                            if !text.trim().is_empty() {
                                let now = Instant::now();
                                controller.notify_copy_gesture(now);
                                if controller.decide(&text, now) == TriggerDecision::Suggest {
                                    callback(build_suggestion(&text));
                                }
                            }
                            last_seen = Some(text);
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "clipboard read failed, skipping tick");
                    }
                }
                std::thread::sleep(config.poll_interval);
            }

            tracing::info!("clipboard watcher stopped");
        });

        self.handle = Some(handle);
    }

    /// Signal the poll loop to exit and wait for it.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for ClipboardWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn build_suggestion(text: &str) -> SuggestEvent {
    let trimmed = text.trim();
    let tokens = tokenize(trimmed);
    SuggestEvent {
        token_count: tokens.len(),
        single: format_list(&tokens, QuoteStyle::Single),
        double: format_list(&tokens, QuoteStyle::Double),
        text: trimmed.to_owned(),
        timestamp_ms: Some(chrono::Utc::now().timestamp_millis()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryClipboard;
    use listwise_detect::ListDetector;
    use std::sync::Mutex;

    fn collect_events() -> (SuggestCallback, Arc<Mutex<Vec<SuggestEvent>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        let callback: SuggestCallback = Arc::new(move |event| {
            sink.lock().unwrap().push(event);
        });
        (callback, captured)
    }

    #[test]
    fn test_build_suggestion_renders_both_styles() {
        let event = build_suggestion("  A001, A002; A003\nA004  ");
        assert_eq!(event.token_count, 4);
        assert_eq!(event.text, "A001, A002; A003\nA004");
        assert_eq!(event.single, "'A001','A002','A003','A004'");
        assert_eq!(event.double, "\"A001\",\"A002\",\"A003\",\"A004\"");
        assert!(event.timestamp_ms.is_some());
    }

    #[test]
    fn test_watcher_suggests_on_new_list_like_content() {
        let clipboard = Arc::new(Mutex::new(MemoryClipboard::with_contents("A001, A002")));
        let (callback, captured) = collect_events();

        let mut watcher = ClipboardWatcher::new();
        watcher.start_with_config(
            Arc::clone(&clipboard),
            TriggerController::new(ListDetector::new()),
            callback,
            WatcherConfig {
                poll_interval: Duration::from_millis(10),
            },
        );
        assert!(watcher.is_running());

        std::thread::sleep(Duration::from_millis(100));
        watcher.stop();
        assert!(!watcher.is_running());

        let events = captured.lock().unwrap();
        // The initial content fires exactly once; unchanged polls are skipped.
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].single, "'A001','A002'");
    }

    #[test]
    fn test_watcher_ignores_prose_and_unchanged_content() {
        let clipboard = Arc::new(Mutex::new(MemoryClipboard::with_contents(
            "just an ordinary sentence, nothing more!",
        )));
        let (callback, captured) = collect_events();

        let mut watcher = ClipboardWatcher::new();
        watcher.start_with_config(
            Arc::clone(&clipboard),
            TriggerController::new(ListDetector::new()),
            callback,
            WatcherConfig {
                poll_interval: Duration::from_millis(10),
            },
        );

        std::thread::sleep(Duration::from_millis(80));
        watcher.stop();

        assert!(captured.lock().unwrap().is_empty());
    }
}

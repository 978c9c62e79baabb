//! Time-windowed trigger policy for list suggestions.
//!
//! Detection runs continuously against copy signals in an environment the
//! tool does not control, and the tool's own clipboard writes come right
//! back through the same channels. The controller wraps the classifier with
//! two timers: a suppression window that swallows self-induced re-triggers,
//! and a copy-gesture window that bounds how stale a deferred clipboard
//! read may be before it is discarded as unrelated.
//!
//! The clock is passed into every decision call rather than read ambiently,
//! so the suppression logic tests deterministically without real delays.

use listwise_detect::ListClassifier;
use std::time::{Duration, Instant};

/// Timing windows for the trigger policy. Durations mirror the behavior the
/// feature shipped with; tunable, not derived.
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    /// Suppression entered when the tool writes the clipboard itself, or
    /// when the user explicitly dismisses or uses a suggestion.
    pub own_copy_suppress: Duration,
    /// Suppression entered after a suggestion fires, long enough for a
    /// second observation channel seeing the same copy to land inside it.
    pub post_suggest_suppress: Duration,
    /// How long after a copy gesture a deferred clipboard read still counts
    /// as belonging to that gesture.
    pub gesture_window: Duration,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            own_copy_suppress: Duration::from_millis(900),
            post_suggest_suppress: Duration::from_millis(400),
            gesture_window: Duration::from_millis(800),
        }
    }
}

/// Outcome of feeding one candidate text to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Surface a suggestion for this text.
    Suggest,
    /// Stay silent.
    Ignore,
}

/// State machine over two independent timers.
///
/// The only mutable, time-dependent state in the core. Single-writer: all
/// mutation happens inside `decide` and the `notify_*` calls, one exclusive
/// borrow per decision.
pub struct TriggerController<C> {
    classifier: C,
    config: TriggerConfig,
    suppress_until: Option<Instant>,
    last_gesture_at: Option<Instant>,
    /// Set once a decision lands for the current gesture, so the slower of
    /// the two observation channels cannot fire a duplicate.
    decided_for_gesture: bool,
}

impl<C: ListClassifier> TriggerController<C> {
    pub fn new(classifier: C) -> Self {
        Self::with_config(classifier, TriggerConfig::default())
    }

    pub fn with_config(classifier: C, config: TriggerConfig) -> Self {
        Self {
            classifier,
            config,
            suppress_until: None,
            last_gesture_at: None,
            decided_for_gesture: false,
        }
    }

    /// Evaluate one candidate text observed at `now`.
    ///
    /// Returns `Suggest` iff the controller is outside the suppression
    /// window, no decision has already landed for the current gesture, and
    /// the classifier accepts the text. A successful fire extends the
    /// suppression window so the same underlying copy event cannot
    /// re-trigger through a second channel.
    pub fn decide(&mut self, text: &str, now: Instant) -> TriggerDecision {
        if self.suppressed(now) {
            tracing::debug!("candidate discarded inside suppression window");
            return TriggerDecision::Ignore;
        }
        if self.decided_for_gesture && self.gesture_is_fresh(now) {
            tracing::debug!("duplicate channel for an already-decided gesture");
            return TriggerDecision::Ignore;
        }
        if !self.classifier.looks_like_list(text) {
            return TriggerDecision::Ignore;
        }

        self.suppress_until = Some(now + self.config.post_suggest_suppress);
        self.decided_for_gesture = true;
        tracing::info!("list-like text detected, suggesting");
        TriggerDecision::Suggest
    }

    /// The tool just wrote the clipboard itself; ignore the echo.
    pub fn notify_own_clipboard_write(&mut self, now: Instant) {
        self.suppress_until = Some(now + self.config.own_copy_suppress);
    }

    /// A copy key-chord (or equivalent gesture) was observed.
    pub fn notify_copy_gesture(&mut self, now: Instant) {
        self.last_gesture_at = Some(now);
        self.decided_for_gesture = false;
    }

    /// Whether a deferred clipboard read completing at `now` is still
    /// attributable to the most recent gesture. Hosts discard stale reads.
    pub fn gesture_is_fresh(&self, now: Instant) -> bool {
        self.last_gesture_at
            .is_some_and(|at| now.duration_since(at) <= self.config.gesture_window)
    }

    fn suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }
}

impl<C> std::fmt::Debug for TriggerController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerController")
            .field("suppress_until", &self.suppress_until)
            .field("last_gesture_at", &self.last_gesture_at)
            .field("decided_for_gesture", &self.decided_for_gesture)
            .finish_non_exhaustive()
    }
}

//! Event bus abstraction for decoupled event emission.
//!
//! The watcher and daemon emit through this trait instead of talking to a
//! concrete transport, so the pipeline tests without any runtime and a
//! future tray or panel frontend can subscribe without touching the core.

use std::sync::{Arc, Mutex};

/// Trait for emitting events to subscribers.
pub trait EventBus: Send + Sync {
    /// Emit an event under a topic (e.g. "clipboard:list_suggested").
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Type alias for shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

/// A captured event from [`InMemoryEventBus`].
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// In-memory event bus that captures everything emitted, for tests.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().expect("event bus mutex poisoned").clone()
    }

    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.topic == topic)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        self.events
            .lock()
            .expect("event bus mutex poisoned")
            .push(EmittedEvent {
                topic: topic.to_string(),
                payload,
            });
    }
}

/// No-op event bus that discards all events.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _topic: &str, _payload: serde_json::Value) {}
}

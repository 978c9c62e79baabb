//! Clipboard capability trait and its implementations.

use crate::{ClipboardError, Result};
use std::sync::{Arc, Mutex};

/// Injected clipboard capability.
///
/// `read_text` returns an empty string when the clipboard holds no text,
/// which callers treat the same as "nothing to do".
pub trait ClipboardProvider: Send {
    fn read_text(&mut self) -> Result<String>;
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The real system clipboard, backed by `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        match self.inner.get_text() {
            Ok(text) => Ok(text),
            // Non-text or empty clipboard is not an error for us.
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(ClipboardError::Read(e.to_string())),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

/// In-memory clipboard double for tests and headless environments.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: String,
}

impl MemoryClipboard {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn read_text(&mut self) -> Result<String> {
        Ok(self.contents.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = text.to_owned();
        Ok(())
    }
}

/// Lets a provider be shared between a watcher thread and the test driving
/// it.
impl<P: ClipboardProvider> ClipboardProvider for Arc<Mutex<P>> {
    fn read_text(&mut self) -> Result<String> {
        self.lock()
            .map_err(|_| ClipboardError::Unavailable("provider mutex poisoned".into()))?
            .read_text()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.lock()
            .map_err(|_| ClipboardError::Unavailable("provider mutex poisoned".into()))?
            .write_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.read_text().unwrap(), "");

        clipboard.write_text("a,b,c").unwrap();
        assert_eq!(clipboard.read_text().unwrap(), "a,b,c");
        assert_eq!(clipboard.contents(), "a,b,c");
    }

    #[test]
    fn test_shared_provider_sees_writes() {
        let shared = Arc::new(Mutex::new(MemoryClipboard::default()));
        let mut handle = Arc::clone(&shared);

        handle.write_text("x y z").unwrap();
        assert_eq!(shared.lock().unwrap().contents(), "x y z");
    }
}

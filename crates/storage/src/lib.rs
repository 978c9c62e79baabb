//! Persisted host values: last input, preferred quote style, watcher
//! enablement.
//!
//! The core pipeline owns no durable state; what survives a restart lives
//! here, in a small SQLite settings table.

use listwise_text::QuoteStyle;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

const KEY_LAST_INPUT: &str = "last_input";
const KEY_QUOTE_STYLE: &str = "quote_style";
const KEY_WATCH_ENABLED: &str = "watch_enabled";

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("listwise").join("listwise.db"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(value) => Ok(Some(value?)),
            None => Ok(None),
        }
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            (key, value),
        )?;
        Ok(())
    }

    /// The most recent text the user fed through the pipeline.
    pub fn last_input(&self) -> Result<Option<String>> {
        self.get_setting(KEY_LAST_INPUT)
    }

    pub fn set_last_input(&self, text: &str) -> Result<()> {
        self.set_setting(KEY_LAST_INPUT, text)
    }

    /// Preferred quoting convention; falls back to the default on a missing
    /// or unparseable stored value.
    pub fn quote_style(&self) -> Result<QuoteStyle> {
        let stored = self.get_setting(KEY_QUOTE_STYLE)?;
        Ok(stored
            .and_then(|s| {
                s.parse()
                    .map_err(|e| tracing::warn!(error = %e, "ignoring stored quote style"))
                    .ok()
            })
            .unwrap_or_default())
    }

    pub fn set_quote_style(&self, style: QuoteStyle) -> Result<()> {
        self.set_setting(KEY_QUOTE_STYLE, style.label())
    }

    /// Whether the background watcher should run. Defaults to enabled.
    pub fn watch_enabled(&self) -> Result<bool> {
        Ok(self
            .get_setting(KEY_WATCH_ENABLED)?
            .map(|v| v != "false")
            .unwrap_or(true))
    }

    pub fn set_watch_enabled(&self, enabled: bool) -> Result<()> {
        self.set_setting(KEY_WATCH_ENABLED, if enabled { "true" } else { "false" })
    }
}

//! Headless daemon and one-shot converter.
//!
//! `listwise watch` polls the clipboard, runs candidates through the
//! trigger policy, and surfaces accepted lists as log lines and bus events.
//! `listwise convert` is the manual path: take text from an argument,
//! stdin, or the clipboard, and print (or copy) its quoted renderings.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use listwise_clipboard::{
    copy_formatted, ClipboardProvider, ClipboardWatcher, SuggestCallback, SystemClipboard,
    WatcherConfig,
};
use listwise_detect::ListDetector;
use listwise_events::{event_names, ClipboardWrittenEvent, EventBus, EventBusRef};
use listwise_storage::Database;
use listwise_text::{format_list, tokenize, QuoteStyle};
use listwise_trigger::TriggerController;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "listwise",
    about = "Detects list-like clipboard text and converts it into quoted lists"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Watch the clipboard and suggest quoted renderings of list-like text.
    Watch {
        /// Path to the settings database.
        #[arg(long)]
        db: Option<PathBuf>,
        /// Clipboard poll interval in milliseconds.
        #[arg(long, default_value_t = 300)]
        interval_ms: u64,
    },
    /// Convert text (argument, stdin, or clipboard) into a quoted list.
    Convert {
        /// Output style; prints both when omitted.
        #[arg(long, value_enum)]
        style: Option<StyleArg>,
        /// Write the result back to the clipboard.
        #[arg(long)]
        copy: bool,
        /// Path to the settings database.
        #[arg(long)]
        db: Option<PathBuf>,
        /// Text to convert; falls back to stdin, then the clipboard.
        text: Option<String>,
    },
    /// Show or change persisted preferences.
    Config {
        /// Path to the settings database.
        #[arg(long)]
        db: Option<PathBuf>,
        /// Enable or disable clipboard watching.
        #[arg(long)]
        watch: Option<bool>,
        /// Preferred quote style for `convert --copy` without `--style`.
        #[arg(long, value_enum)]
        style: Option<StyleArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Single,
    Double,
}

impl From<StyleArg> for QuoteStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Single => QuoteStyle::Single,
            StyleArg::Double => QuoteStyle::Double,
        }
    }
}

/// Bus that forwards every emitted event into the log stream.
struct LogEventBus;

impl EventBus for LogEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        tracing::info!(topic, %payload, "event");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Watch { db, interval_ms } => run_watch(db, interval_ms),
        Command::Convert {
            style,
            copy,
            db,
            text,
        } => run_convert(style, copy, db, text),
        Command::Config { db, watch, style } => run_config(db, watch, style),
    }
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<Database> {
    let path = path
        .or_else(Database::default_path)
        .context("no writable data directory for the settings database")?;
    Database::open(&path).with_context(|| format!("opening settings database at {path:?}"))
}

fn run_watch(db: Option<PathBuf>, interval_ms: u64) -> anyhow::Result<()> {
    let db = open_database(db)?;
    if !db.watch_enabled()? {
        tracing::warn!("watching is disabled; run `listwise config --watch true` to enable");
        return Ok(());
    }

    let provider = SystemClipboard::new()?;
    let controller = TriggerController::new(ListDetector::new());
    let bus: EventBusRef = Arc::new(LogEventBus);

    let (tx, rx) = crossbeam_channel::unbounded();
    let callback: SuggestCallback = Arc::new(move |event| {
        let _ = tx.send(event);
    });

    let mut watcher = ClipboardWatcher::new();
    watcher.start_with_config(
        provider,
        controller,
        callback,
        WatcherConfig {
            poll_interval: Duration::from_millis(interval_ms),
        },
    );

    // Runs until the process is terminated.
    for event in rx {
        tracing::info!(
            tokens = event.token_count,
            single = %event.single,
            double = %event.double,
            "list-like clipboard text detected"
        );
        bus.emit(event_names::LIST_SUGGESTED, serde_json::to_value(&event)?);
        db.set_last_input(&event.text)?;
    }

    watcher.stop();
    Ok(())
}

fn run_convert(
    style: Option<StyleArg>,
    copy: bool,
    db: Option<PathBuf>,
    text: Option<String>,
) -> anyhow::Result<()> {
    let db = open_database(db)?;
    let input = resolve_input(text)?;
    let tokens = tokenize(&input);
    anyhow::ensure!(!tokens.is_empty(), "no tokens found in input");

    let chosen = style.map(QuoteStyle::from);
    if let Some(style) = chosen {
        db.set_quote_style(style)?;
    }

    match chosen {
        Some(style) => println!("{}", format_list(&tokens, style)),
        None => {
            println!("{}", format_list(&tokens, QuoteStyle::Single));
            println!("{}", format_list(&tokens, QuoteStyle::Double));
        }
    }

    if copy {
        let style = match chosen {
            Some(style) => style,
            None => db.quote_style()?,
        };
        let mut provider = SystemClipboard::new()?;
        let mut controller = TriggerController::new(ListDetector::new());
        let formatted =
            copy_formatted(&mut provider, &mut controller, &tokens, style, Instant::now())?;
        let bus: EventBusRef = Arc::new(LogEventBus);
        bus.emit(
            event_names::LIST_COPIED,
            serde_json::to_value(ClipboardWrittenEvent {
                style,
                chars: formatted.chars().count(),
            })?,
        );
    }

    db.set_last_input(&input)?;
    Ok(())
}

fn run_config(
    db: Option<PathBuf>,
    watch: Option<bool>,
    style: Option<StyleArg>,
) -> anyhow::Result<()> {
    let db = open_database(db)?;

    if let Some(enabled) = watch {
        db.set_watch_enabled(enabled)?;
    }
    if let Some(style) = style {
        db.set_quote_style(style.into())?;
    }

    println!("watch: {}", db.watch_enabled()?);
    println!("style: {}", db.quote_style()?);
    Ok(())
}

/// Argument text wins; otherwise piped stdin; otherwise the clipboard.
fn resolve_input(text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if !std::io::stdin().is_terminal() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        if !buffer.trim().is_empty() {
            return Ok(buffer);
        }
    }

    let mut clipboard = SystemClipboard::new()?;
    let contents = clipboard.read_text()?;
    anyhow::ensure!(
        !contents.trim().is_empty(),
        "no input given and the clipboard is empty"
    );
    Ok(contents)
}

//! # Console Log Model
//!
//! Display-side conversation log of the console. Kept separate from the
//! program buffer: entries are for reading, never for execution.

use std::fmt;

use chrono::Local;
use serde_json::Value;

use crate::repl::events::ConsoleEvent;

/// Format of entry timestamps, e.g. `09:41:07.032`
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// Severity/role of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Output,
    Error,
    Echo,
}

/// Body of a log entry
#[derive(Debug, Clone, PartialEq)]
pub enum LogText {
    /// Highlighter markup (echoed input)
    Markup(String),
    /// Plain message text
    Plain(String),
    /// A value read from the program or a literal read
    Value(Value),
}

impl fmt::Display for LogText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogText::Markup(text) | LogText::Plain(text) => f.write_str(text),
            LogText::Value(Value::String(text)) => f.write_str(text),
            LogText::Value(value) => write!(f, "{value}"),
        }
    }
}

/// One console log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub text: LogText,
    pub kind: LogKind,
    pub timestamp: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(text: LogText, kind: LogKind) -> Self {
        Self {
            text,
            kind,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn info<S: Into<String>>(text: S) -> Self {
        Self::new(LogText::Plain(text.into()), LogKind::Info)
    }

    pub fn output(value: Value) -> Self {
        Self::new(LogText::Value(value), LogKind::Output)
    }

    pub fn error<S: Into<String>>(text: S) -> Self {
        Self::new(LogText::Plain(text.into()), LogKind::Error)
    }

    pub fn echo<S: Into<String>>(markup: S) -> Self {
        Self::new(LogText::Markup(markup.into()), LogKind::Echo)
    }
}

/// Append-only list of log entries, clearable as a whole
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    entries: Vec<LogEntry>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning event
    pub fn push(&mut self, entry: LogEntry) -> ConsoleEvent {
        self.entries.push(entry);
        ConsoleEvent::EntryAppended {
            index: self.entries.len() - 1,
        }
    }

    /// Drop every entry, returning event
    pub fn clear(&mut self) -> ConsoleEvent {
        self.entries.clear();
        ConsoleEvent::LogCleared
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

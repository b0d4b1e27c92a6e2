//! # Terminal Renderer
//!
//! Prints console log entries to a line-oriented terminal. The renderer
//! subscribes to console events rather than reading session state directly:
//! each appended entry is printed once, and a cleared log clears the screen.

use std::io::Write;

use anyhow::Result;
use regex::{Captures, Regex};

use super::ansi_escape_codes::*;
use crate::repl::events::ConsoleEvent;
use crate::repl::models::{ConsoleLog, LogEntry, LogKind};
use crate::repl::syntax::{TokenClass, LINE_BREAK};

/// Prompt shown when the console is ready for input
pub const PROMPT: &str = "qasm> ";
/// Prompt shown while a remote read is outstanding
pub const BUSY_PROMPT: &str = "qasm…> ";

/// Trait for rendering views
pub trait ViewRenderer {
    /// Print one log entry
    fn render_entry(&mut self, entry: &LogEntry) -> Result<()>;

    /// Clear everything printed so far
    fn clear(&mut self) -> Result<()>;

    /// Show the input prompt
    fn render_prompt(&mut self, busy: bool) -> Result<()>;

    /// Bring the newest output into view
    fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Handle console events
    fn handle_console_event(&mut self, event: &ConsoleEvent, log: &ConsoleLog) -> Result<()> {
        match event {
            ConsoleEvent::EntryAppended { index } => match log.get(*index) {
                Some(entry) => self.render_entry(entry)?,
                None => tracing::debug!("Entry {} no longer in log, skipping", index),
            },
            ConsoleEvent::LogCleared => self.clear()?,
            ConsoleEvent::ProgramReset => {}
        }

        if event.scrolls_to_bottom() {
            self.scroll_to_bottom()?;
        }
        Ok(())
    }
}

/// Converts highlighter markup into terminal text
#[derive(Debug, Clone)]
pub struct MarkupConverter {
    tokens: Regex,
    colors: bool,
}

impl MarkupConverter {
    pub fn new(colors: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            tokens: Regex::new(r#"<span class="([a-z]+)">|</span>|<br />|&lt;|&gt;"#)?,
            colors,
        })
    }

    fn class_color(class: &str) -> &'static str {
        match TokenClass::from_css_class(class) {
            Some(TokenClass::Keyword) => FG_KEYWORD,
            Some(TokenClass::Function) => FG_FUNCTION,
            Some(TokenClass::Number) => FG_NUMBER,
            Some(TokenClass::Address) => FG_ADDRESS,
            Some(TokenClass::Comment) => FG_COMMENT,
            None => "",
        }
    }

    /// Replace span tags with colors (or nothing) and unescape entities
    pub fn convert(&self, markup: &str) -> String {
        self.tokens
            .replace_all(markup, |caps: &Captures| {
                let token = &caps[0];
                if let Some(class) = caps.get(1) {
                    return if self.colors {
                        Self::class_color(class.as_str()).to_string()
                    } else {
                        String::new()
                    };
                }
                match token {
                    "</span>" if self.colors => RESET.to_string(),
                    "</span>" => String::new(),
                    LINE_BREAK => "\n".to_string(),
                    "&lt;" => "<".to_string(),
                    "&gt;" => ">".to_string(),
                    other => other.to_string(),
                }
            })
            .into_owned()
    }
}

/// Line-oriented renderer writing to any [`Write`] sink
pub struct TerminalRenderer<W: Write> {
    writer: W,
    colors: bool,
    interactive: bool,
    markup: MarkupConverter,
}

impl<W: Write> TerminalRenderer<W> {
    /// Create a renderer; `interactive` enables colors, prompts and screen clearing
    pub fn new(writer: W, interactive: bool) -> Result<Self> {
        Ok(Self {
            writer,
            colors: interactive,
            interactive,
            markup: MarkupConverter::new(interactive)?,
        })
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colors && !color.is_empty() {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format one entry as printed, without trailing newline
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        let timestamp = self.paint(FG_TIMESTAMP, &format!("[{}]", entry.timestamp));
        let body = match entry.kind {
            LogKind::Echo => format!("> {}", self.markup.convert(&entry.text.to_string())),
            LogKind::Info => self.paint(FG_INFO, &entry.text.to_string()),
            LogKind::Output => self.paint(FG_OUTPUT, &entry.text.to_string()),
            LogKind::Error => self.paint(FG_ERROR, &entry.text.to_string()),
        };
        format!("{timestamp} {body}")
    }
}

impl<W: Write> ViewRenderer for TerminalRenderer<W> {
    fn render_entry(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format_entry(entry);
        if self.interactive {
            // The prompt is already on screen; start the entry on a fresh line.
            write!(self.writer, "\r")?;
        }
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.interactive {
            write!(self.writer, "{CLEAR_SCREEN}{CURSOR_HOME}")?;
        } else {
            writeln!(self.writer, "--- log cleared ---")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn render_prompt(&mut self, busy: bool) -> Result<()> {
        if !self.interactive {
            return Ok(());
        }
        let prompt = if busy { BUSY_PROMPT } else { PROMPT };
        write!(self.writer, "{}", self.paint(BOLD, prompt))?;
        self.writer.flush()?;
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<()> {
        // The newest line is the last one written.
        self.writer.flush()?;
        Ok(())
    }
}

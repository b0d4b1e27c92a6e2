//! # Program Buffer
//!
//! Instruction lines accumulated by the console since the last `reset`.
//! Append-only apart from a full clear; the whole buffer is sent with every
//! remote read.

use crate::repl::events::ConsoleEvent;

/// Ordered instruction lines of the current console program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramBuffer {
    lines: Vec<String>,
}

impl ProgramBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one instruction line verbatim
    pub fn push<S: Into<String>>(&mut self, line: S) {
        self.lines.push(line.into());
    }

    /// Drop every line, returning event
    pub fn clear(&mut self) -> ConsoleEvent {
        self.lines.clear();
        ConsoleEvent::ProgramReset
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Copy of the current lines, as sent to the executor
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_buffer_should_keep_insertion_order() {
        let mut buffer = ProgramBuffer::new();
        buffer.push("alloc 1");
        buffer.push("X 0Q".to_string());

        assert_eq!(buffer.lines(), &["alloc 1", "X 0Q"]);
        assert_eq!(buffer.snapshot(), vec!["alloc 1", "X 0Q"]);
    }

    #[test]
    fn clear_should_empty_buffer_and_report_reset() {
        let mut buffer = ProgramBuffer::new();
        buffer.push("alloc 1");

        assert_eq!(buffer.clear(), ConsoleEvent::ProgramReset);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }
}

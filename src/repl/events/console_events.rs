//! # Console Events
//!
//! Events emitted when the console session's models change state.
//! The display layer subscribes to these instead of sharing session state.

/// Events emitted when console models change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// A log entry was appended at `index`
    EntryAppended { index: usize },

    /// Every log entry was dropped
    LogCleared,

    /// The program buffer was emptied
    ProgramReset,
}

impl ConsoleEvent {
    /// Whether the display should scroll to its newest line
    pub fn scrolls_to_bottom(&self) -> bool {
        matches!(self, ConsoleEvent::EntryAppended { .. })
    }
}

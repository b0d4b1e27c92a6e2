//! # Views Module
//!
//! Contains all view-related components for rendering the console.

pub mod ansi_escape_codes;
pub mod terminal_renderer;

// Re-export main types for convenience
pub use terminal_renderer::{MarkupConverter, TerminalRenderer, ViewRenderer, BUSY_PROMPT, PROMPT};

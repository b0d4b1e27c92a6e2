//! # Syntax Highlighting
//!
//! Pattern table and tokenizer for the instruction language.

pub mod highlighter;
pub mod patterns;

pub use highlighter::{escape_first, Highlighted, Highlighter, Span, LINE_BREAK, PADDING};
pub use patterns::{PatternRule, PatternSet, TokenClass};

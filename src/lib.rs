//! # qline - Console and Highlighter for a Quantum Assembly Language
//!
//! An interactive console that accumulates a program line by line and reads
//! classical memory by sending the program to a remote executor, plus the
//! syntax highlighter used to echo and display instruction source.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   Events    ┌────────────────┐   Tickets   ┌────────────┐
//! │    View     │◄────────────│ ConsoleSession │────────────►│ Execution  │
//! │             │             │                │◄────────────│  Service   │
//! │ - Terminal  │             │ - Program      │  Completion │            │
//! │ - Colors    │             │ - Log          │             │ - HTTP     │
//! └─────────────┘             └────────────────┘             └────────────┘
//!                                     ▲
//!                                     │ Lines
//!                              ┌──────────────┐
//!                              │  Controller  │
//!                              │ - Event Loop │
//!                              └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;

//! # Console Architecture
//!
//! The console is split into owned state blocks and the components that
//! act on them:
//!
//! - `syntax`: pattern table and highlighter
//! - `commands`: classification of submitted lines
//! - `models`: program buffer and console log
//! - `session`: the state machine tying them together
//! - `services`: the remote execution boundary
//! - `views`: terminal rendering, driven by `events`
//! - `controller`: the event loop

pub mod commands;
pub mod controller;
pub mod errors;
pub mod events;
pub mod models;
pub mod services;
pub mod session;
pub mod syntax;
pub mod views;

// Re-export core types
pub use controller::AppController;
pub use errors::ConsoleError;
pub use session::{ConsoleSession, READ_SHOTS, RESET_MESSAGE, WELCOME_MESSAGE};
pub use syntax::{Highlighter, TokenClass};

// Re-export specific items to avoid conflicts
pub use commands::{CommandRegistry, ConsoleCommand};
pub use events::{ConsoleEvent, EventBus, SimpleEventBus};
pub use models::{ConsoleLog, LogEntry, LogKind, LogText, ProgramBuffer};
pub use services::{
    ExecuteRequest, ExecutionError, ExecutionResult, ExecutionService, Executor, HttpExecutor,
};

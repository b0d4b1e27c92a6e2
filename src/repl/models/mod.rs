//! # Models Module
//!
//! Owned state blocks of the console: the program buffer sent for execution
//! and the log shown to the user.

pub mod console_log;
pub mod program_buffer;

pub use console_log::{ConsoleLog, LogEntry, LogKind, LogText, TIMESTAMP_FORMAT};
pub use program_buffer::ProgramBuffer;

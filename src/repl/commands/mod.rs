//! # Command Implementations
//!
//! Grammars of the console input line.

pub mod console_commands;

pub use console_commands::{
    CommandParser, CommandRegistry, ConsoleCommand, KeywordCommand, ReadCommand,
};

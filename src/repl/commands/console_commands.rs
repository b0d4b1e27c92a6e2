//! # Console Commands
//!
//! Classification of submitted console lines. Each recognized grammar is a
//! small parser tried in priority order; a line no parser claims is an
//! instruction for the program buffer.

use regex::Regex;

/// A classified console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `reset`: empty the program buffer
    Reset,
    /// `clear`: empty the console log
    Clear,
    /// `read <n>`: echo the integer locally
    ReadLiteral(u64),
    /// `read <n>b`: execute the program and read classical address `n`
    ReadMemory(usize),
    /// A `read` line whose operand cannot be represented
    Malformed { line: String, reason: String },
    /// Anything else, kept verbatim
    Instruction(String),
}

/// Trait for console command grammars
pub trait CommandParser: Send + Sync {
    /// Classify `line`, or return `None` if this grammar does not apply
    fn parse(&self, line: &str) -> Option<ConsoleCommand>;

    /// Get parser name for debugging
    fn name(&self) -> &'static str;
}

/// Exact-match keyword command (`reset`, `clear`)
pub struct KeywordCommand {
    keyword: &'static str,
    command: ConsoleCommand,
}

impl KeywordCommand {
    pub fn reset() -> Self {
        Self {
            keyword: "reset",
            command: ConsoleCommand::Reset,
        }
    }

    pub fn clear() -> Self {
        Self {
            keyword: "clear",
            command: ConsoleCommand::Clear,
        }
    }
}

impl CommandParser for KeywordCommand {
    fn parse(&self, line: &str) -> Option<ConsoleCommand> {
        (line == self.keyword).then(|| self.command.clone())
    }

    fn name(&self) -> &'static str {
        self.keyword
    }
}

/// `read <n>` and `read <n>b`, with surrounding blanks and a trailing comment allowed
pub struct ReadCommand {
    pattern: Regex,
}

impl ReadCommand {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(r"^\s*read ([0-9]+)(b?)\s*(#.*)?$")?,
        })
    }
}

impl CommandParser for ReadCommand {
    fn parse(&self, line: &str) -> Option<ConsoleCommand> {
        let caps = self.pattern.captures(line)?;
        let digits = caps.get(1)?.as_str();
        let is_memory = caps.get(2).is_some_and(|m| !m.as_str().is_empty());

        let command = if is_memory {
            match digits.parse::<usize>() {
                Ok(address) => ConsoleCommand::ReadMemory(address),
                Err(e) => ConsoleCommand::Malformed {
                    line: line.to_string(),
                    reason: format!("address {digits} is out of range ({e})"),
                },
            }
        } else {
            match digits.parse::<u64>() {
                Ok(value) => ConsoleCommand::ReadLiteral(value),
                Err(e) => ConsoleCommand::Malformed {
                    line: line.to_string(),
                    reason: format!("{digits} is not a valid integer ({e})"),
                },
            }
        };
        Some(command)
    }

    fn name(&self) -> &'static str {
        "read"
    }
}

type CommandParserCollection = Vec<Box<dyn CommandParser>>;

/// Ordered set of console grammars
pub struct CommandRegistry {
    parsers: CommandParserCollection,
}

impl CommandRegistry {
    /// Create a registry with the standard grammars: read, reset, clear
    pub fn new() -> Result<Self, regex::Error> {
        let parsers: CommandParserCollection = vec![
            Box::new(ReadCommand::new()?),
            Box::new(KeywordCommand::reset()),
            Box::new(KeywordCommand::clear()),
        ];
        Ok(Self { parsers })
    }

    /// Classify a submitted line; unclaimed lines become instructions
    pub fn classify(&self, line: &str) -> ConsoleCommand {
        for parser in &self.parsers {
            if let Some(command) = parser.parse(line) {
                tracing::debug!("Console line {:?} handled by {}", line, parser.name());
                return command;
            }
        }
        ConsoleCommand::Instruction(line.to_string())
    }
}

//! # Console Session
//!
//! Line-oriented state machine behind the console. Each submitted line is
//! echoed, classified, and either handled locally (reset, clear, literal
//! reads, buffering) or turned into an [`ExecutionTicket`] for the caller to
//! dispatch.
//!
//! Remote reads are single-flight: while one is outstanding, further remote
//! reads are queued in submission order, each with the program snapshot and
//! address it was submitted with. A completion is accepted only for the id
//! currently in flight.

use std::collections::VecDeque;

use serde_json::Value;

use crate::repl::commands::{CommandRegistry, ConsoleCommand};
use crate::repl::errors::ConsoleError;
use crate::repl::events::{ConsoleEventHandler, EventBus, SimpleEventBus};
use crate::repl::models::{ConsoleLog, LogEntry, ProgramBuffer};
use crate::repl::services::{ExecuteRequest, ExecutionResult, ExecutionTicket, RequestId};
use crate::repl::syntax::Highlighter;

/// Shown when the session starts and after every `reset`
pub const WELCOME_MESSAGE: &str =
    "Start the console by allocating memory with `alloc`. Later, to read memory type `read <idx>b`.";

/// Shown after `reset`
pub const RESET_MESSAGE: &str =
    "Start the console by allocating memory with `alloc`. Later, to read memory type `read`.";

/// Shot count of console reads
pub const READ_SHOTS: u32 = 1;

/// A remote read waiting for dispatch
#[derive(Debug, Clone)]
struct QueuedRead {
    id: RequestId,
    address: usize,
    instructions: Vec<String>,
}

/// The remote read currently outstanding
#[derive(Debug, Clone, Copy)]
struct InFlightRead {
    id: RequestId,
    address: usize,
}

pub struct ConsoleSession {
    commands: CommandRegistry,
    highlighter: Highlighter,
    program: ProgramBuffer,
    log: ConsoleLog,
    in_flight: Option<InFlightRead>,
    queued: VecDeque<QueuedRead>,
    next_request: u64,
    event_bus: Box<dyn EventBus>,
}

impl ConsoleSession {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_event_bus(Box::new(SimpleEventBus::new()))
    }

    /// Create a session publishing its events on `event_bus`
    pub fn with_event_bus(event_bus: Box<dyn EventBus>) -> Result<Self, regex::Error> {
        let mut session = Self {
            commands: CommandRegistry::new()?,
            highlighter: Highlighter::new()?,
            program: ProgramBuffer::new(),
            log: ConsoleLog::new(),
            in_flight: None,
            queued: VecDeque::new(),
            next_request: 0,
            event_bus,
        };
        session.append(LogEntry::info(WELCOME_MESSAGE));
        Ok(session)
    }

    /// Subscribe a display handler to session events
    pub fn subscribe(&mut self, handler: ConsoleEventHandler) {
        self.event_bus.subscribe(handler);
    }

    /// Handle one submitted line
    ///
    /// Returns a ticket when the line starts a remote read that must be
    /// dispatched now; queued reads are handed out later by [`Self::complete`].
    pub fn submit(&mut self, line: &str) -> Option<ExecutionTicket> {
        let echo = self.highlighter.render(line);
        self.append(LogEntry::echo(echo));

        match self.commands.classify(line) {
            ConsoleCommand::ReadLiteral(value) => {
                self.append(LogEntry::output(Value::from(value)));
                None
            }
            ConsoleCommand::ReadMemory(address) => self.request_read(address),
            ConsoleCommand::Reset => {
                tracing::debug!("Resetting program of {} lines", self.program.len());
                let event = self.program.clear();
                self.event_bus.publish(event);
                self.append(LogEntry::info(RESET_MESSAGE));
                None
            }
            ConsoleCommand::Clear => {
                let event = self.log.clear();
                self.event_bus.publish(event);
                None
            }
            ConsoleCommand::Malformed { line, reason } => {
                self.report(ConsoleError::MalformedCommand { line, reason });
                None
            }
            ConsoleCommand::Instruction(instruction) => {
                self.program.push(instruction);
                None
            }
        }
    }

    /// Accept the outcome of the in-flight read
    ///
    /// Returns the next queued read, if any, now that the session is free.
    pub fn complete(&mut self, id: RequestId, outcome: ExecutionResult) -> Option<ExecutionTicket> {
        let in_flight = match self.in_flight.take() {
            Some(read) if read.id == id => read,
            other => {
                tracing::warn!(
                    "Ignoring completion for {:?}; in flight: {:?}",
                    id,
                    other.map(|r| r.id)
                );
                self.in_flight = other;
                return None;
            }
        };
        tracing::info!("Request {:?} completed", id);

        match outcome {
            Ok(values) => match values.get(in_flight.address) {
                Some(value) if !value.is_null() => {
                    self.append(LogEntry::output(value.clone()));
                }
                _ => self.report(ConsoleError::InvalidAddress {
                    address: in_flight.address,
                }),
            },
            Err(e) => self.report(e.into()),
        }

        let next = self.queued.pop_front()?;
        Some(self.start(next))
    }

    /// Whether a remote read is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of remote reads waiting behind the in-flight one
    pub fn queued_reads(&self) -> usize {
        self.queued.len()
    }

    pub fn program(&self) -> &ProgramBuffer {
        &self.program
    }

    pub fn log(&self) -> &ConsoleLog {
        &self.log
    }

    fn request_read(&mut self, address: usize) -> Option<ExecutionTicket> {
        self.next_request += 1;
        let read = QueuedRead {
            id: RequestId(self.next_request),
            address,
            instructions: self.program.snapshot(),
        };

        if self.is_busy() {
            tracing::debug!("Read of {}b queued behind in-flight request", address);
            self.queued.push_back(read);
            return None;
        }
        Some(self.start(read))
    }

    fn start(&mut self, read: QueuedRead) -> ExecutionTicket {
        self.in_flight = Some(InFlightRead {
            id: read.id,
            address: read.address,
        });
        ExecutionTicket {
            id: read.id,
            request: ExecuteRequest::new(read.instructions, READ_SHOTS),
        }
    }

    fn report(&mut self, error: ConsoleError) {
        tracing::debug!("Console error: {error}");
        self.append(LogEntry::error(error.to_string()));
    }

    fn append(&mut self, entry: LogEntry) {
        let event = self.log.push(entry);
        self.event_bus.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::events::{ConsoleEvent, PendingEvents};
    use crate::repl::models::{LogKind, LogText};
    use crate::repl::services::ExecutionError;
    use serde_json::json;

    fn session() -> ConsoleSession {
        ConsoleSession::new().unwrap()
    }

    fn last_text(session: &ConsoleSession) -> String {
        session.log().last().unwrap().text.to_string()
    }

    #[test]
    fn new_session_should_start_with_welcome_entry() {
        let session = session();
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().entries()[0].kind, LogKind::Info);
        assert!(session.program().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn submit_should_echo_highlighted_input_first() {
        let mut session = session();
        session.submit("H 0Q");

        let echo = session.log().last().unwrap();
        assert_eq!(echo.kind, LogKind::Echo);
        assert_eq!(
            echo.text,
            LogText::Markup(
                r#"<span class="func">H</span> <span class="address">0Q</span>"#.to_string()
            )
        );
    }

    #[test]
    fn instructions_should_accumulate_in_program() {
        let mut session = session();
        assert!(session.submit("alloc 1").is_none());
        assert!(session.submit("X 0Q").is_none());

        assert_eq!(session.program().lines(), &["alloc 1", "X 0Q"]);
    }

    #[test]
    fn reset_should_empty_program_and_keep_log() {
        let mut session = session();
        session.submit("alloc 1");
        let before = session.log().len();

        session.submit("reset");

        assert!(session.program().is_empty());
        // echo + welcome info
        assert_eq!(session.log().len(), before + 2);
        assert_eq!(session.log().last().unwrap().kind, LogKind::Info);
        assert_eq!(last_text(&session), RESET_MESSAGE);
    }

    #[test]
    fn clear_should_empty_log_and_keep_program() {
        let mut session = session();
        session.submit("alloc 1");
        session.submit("clear");

        assert!(session.log().is_empty());
        assert_eq!(session.program().lines(), &["alloc 1"]);
    }

    #[test]
    fn literal_read_should_log_integer_without_remote_call() {
        let mut session = session();
        session.submit("alloc 1");

        assert!(session.submit("read 7").is_none());
        assert!(!session.is_busy());
        let entry = session.log().last().unwrap();
        assert_eq!(entry.kind, LogKind::Output);
        assert_eq!(entry.text, LogText::Value(json!(7)));
        assert_eq!(session.program().lines(), &["alloc 1"]);
    }

    #[test]
    fn memory_read_should_send_whole_program_with_one_shot() {
        let mut session = session();
        session.submit("alloc 1");
        session.submit("X 0Q");

        let ticket = session.submit("read 0b").unwrap();

        assert_eq!(
            ticket.request,
            ExecuteRequest::new(vec!["alloc 1".into(), "X 0Q".into()], 1)
        );
        assert!(session.is_busy());
        assert_eq!(session.program().len(), 2);
    }

    #[test]
    fn read_with_stray_blanks_should_dispatch_and_leave_program_alone() {
        let mut session = session();
        session.submit("alloc 1");

        let ticket = session.submit("read 0b ").unwrap();
        assert_eq!(ticket.request.instructions, vec!["alloc 1"]);
        session.complete(ticket.id, Ok(vec![json!(1.0)]));

        let ticket = session.submit(" read 0b # again").unwrap();
        assert_eq!(ticket.request.instructions, vec!["alloc 1"]);
        assert_eq!(session.program().lines(), &["alloc 1"]);
    }

    #[test]
    fn completed_read_should_log_value_at_address() {
        let mut session = session();
        session.submit("alloc 1");
        let ticket = session.submit("read 0b").unwrap();

        assert!(session.complete(ticket.id, Ok(vec![json!(1.0)])).is_none());

        assert!(!session.is_busy());
        assert_eq!(session.log().last().unwrap().kind, LogKind::Output);
        assert_eq!(last_text(&session), "1.0");
    }

    #[test]
    fn missing_address_should_log_invalid_address() {
        let mut session = session();
        let ticket = session.submit("read 3b").unwrap();

        session.complete(ticket.id, Ok(vec![json!(0.0), json!(null)]));

        assert_eq!(session.log().last().unwrap().kind, LogKind::Error);
        assert_eq!(
            last_text(&session),
            "ERR_CANNOT_PARSE_DATA: The address 3b does not point to a classical bit"
        );
    }

    #[test]
    fn null_value_should_count_as_missing() {
        let mut session = session();
        let ticket = session.submit("read 1b").unwrap();

        session.complete(ticket.id, Ok(vec![json!(0.0), json!(null)]));

        assert_eq!(session.log().last().unwrap().kind, LogKind::Error);
    }

    #[test]
    fn remote_error_should_log_code_and_message() {
        let mut session = session();
        session.submit("bogus");
        let ticket = session.submit("read 0b").unwrap();

        session.complete(
            ticket.id,
            Err(ExecutionError::new(
                "ERR_CANNOT_COMPILE",
                "Invalid qasm instruction 'bogus'",
            )),
        );

        assert!(!session.is_busy());
        assert_eq!(
            last_text(&session),
            "ERR_CANNOT_COMPILE: Invalid qasm instruction 'bogus'"
        );
    }

    #[test]
    fn malformed_read_should_log_error_and_skip_program() {
        let mut session = session();
        assert!(session.submit("read 99999999999999999999999").is_none());

        assert_eq!(session.log().last().unwrap().kind, LogKind::Error);
        assert!(last_text(&session).starts_with("ERR_MALFORMED_COMMAND"));
        assert!(session.program().is_empty());
    }

    #[test]
    fn reads_submitted_while_busy_should_queue_in_order() {
        let mut session = session();
        session.submit("alloc 2");
        let first = session.submit("read 0b").unwrap();
        session.submit("M 0Q, 1b");
        assert!(session.submit("read 1b").is_none());
        assert_eq!(session.queued_reads(), 1);

        let second = session
            .complete(first.id, Ok(vec![json!(0.25), json!(0.75)]))
            .unwrap();
        assert_eq!(last_text(&session), "0.25");
        assert!(session.is_busy());
        // The queued read carries the program as it was when submitted.
        assert_eq!(second.request.instructions, vec!["alloc 2", "M 0Q, 1b"]);

        assert!(session
            .complete(second.id, Ok(vec![json!(0.5), json!(1.0)]))
            .is_none());
        assert_eq!(last_text(&session), "1.0");
        assert!(!session.is_busy());
    }

    #[test]
    fn completion_for_unknown_request_should_be_ignored() {
        let mut session = session();
        let ticket = session.submit("read 0b").unwrap();
        let entries = session.log().len();

        assert!(session
            .complete(RequestId(ticket.id.0 + 10), Ok(vec![json!(9.0)]))
            .is_none());
        assert_eq!(session.log().len(), entries);
        assert!(session.is_busy());

        session.complete(ticket.id, Ok(vec![json!(1.0)]));
        assert_eq!(last_text(&session), "1.0");
    }

    #[test]
    fn session_should_publish_events_for_display() {
        let pending = PendingEvents::new();
        let mut session = session();
        session.subscribe(pending.recorder());

        session.submit("alloc 1");
        session.submit("reset");
        session.submit("clear");

        assert_eq!(
            pending.drain(),
            vec![
                ConsoleEvent::EntryAppended { index: 1 },
                ConsoleEvent::EntryAppended { index: 2 },
                ConsoleEvent::ProgramReset,
                ConsoleEvent::EntryAppended { index: 3 },
                ConsoleEvent::EntryAppended { index: 4 },
                ConsoleEvent::LogCleared,
            ]
        );
    }
}

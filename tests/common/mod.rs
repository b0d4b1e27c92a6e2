//! Common test utilities for console integration tests

pub mod executor;

use qline::repl::models::{LogEntry, LogKind};
use qline::AppController;
use tokio::io::BufReader;

#[allow(unused_imports)]
pub use executor::ScriptedExecutor;

/// Controller reading `input` and writing plain (non-interactive) output
pub type TestController<'a> = AppController<ScriptedExecutor, BufReader<&'a [u8]>, Vec<u8>>;

pub fn controller(executor: ScriptedExecutor, input: &str) -> TestController<'_> {
    AppController::with_io_streams(executor, BufReader::new(input.as_bytes()), Vec::new(), false)
        .unwrap()
}

/// Text of every log entry of `kind`, oldest first
pub fn texts_of(entries: &[LogEntry], kind: LogKind) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.text.to_string())
        .collect()
}

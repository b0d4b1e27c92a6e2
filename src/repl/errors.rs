//! # Console Errors
//!
//! Failures surfaced to the user as error log entries. None of them ends the
//! session.

use thiserror::Error;

use crate::repl::services::ExecutionError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// A `read <n>b` address with no value in the execution result
    #[error("ERR_CANNOT_PARSE_DATA: The address {address}b does not point to a classical bit")]
    InvalidAddress { address: usize },

    /// Error reported by the execution boundary
    #[error(transparent)]
    RemoteExecution(#[from] ExecutionError),

    /// A `read` line whose operand could not be parsed
    #[error("ERR_MALFORMED_COMMAND: {reason} in `{line}`")]
    MalformedCommand { line: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_should_name_the_address() {
        let err = ConsoleError::InvalidAddress { address: 3 };
        assert_eq!(
            err.to_string(),
            "ERR_CANNOT_PARSE_DATA: The address 3b does not point to a classical bit"
        );
    }

    #[test]
    fn remote_error_should_keep_code_and_message() {
        let err: ConsoleError = ExecutionError::new("ERR_CANNOT_EXECUTE", "timeout").into();
        assert_eq!(err.to_string(), "ERR_CANNOT_EXECUTE: timeout");
    }
}

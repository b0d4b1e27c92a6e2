//! # Services Layer
//!
//! Services encapsulate external resources used by the console. The only one
//! is the execution boundary.

pub mod execution;

pub use execution::{
    format_outcome, parse_response, run_program, ExecuteRequest, ExecuteResponse, ExecutionError,
    ExecutionMessage, ExecutionResult, ExecutionService, ExecutionTicket, Executor, HttpExecutor,
    RequestId,
};

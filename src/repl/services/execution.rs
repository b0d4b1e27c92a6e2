//! # Execution Service
//!
//! Boundary to the remote executor. The console never interprets
//! instructions itself: it posts the accumulated program and consumes the
//! ordered result array or a `(code, message)` error.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::ConsoleProfile;

/// Error code for failures to reach the executor
pub const ERR_CONNECTION: &str = "ERR_CONNECTION";
/// Error code for a non-success status without a structured error body
pub const ERR_HTTP_STATUS: &str = "ERR_HTTP_STATUS";
/// Error code for a response body that cannot be decoded
pub const ERR_BAD_RESPONSE: &str = "ERR_BAD_RESPONSE";

/// Structured error reported by the execution boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ExecutionError {
    pub code: String,
    pub message: String,
}

impl ExecutionError {
    pub fn new<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Ordered result values indexed by classical memory address
pub type ExecutionResult = Result<Vec<Value>, ExecutionError>;

/// Request body of the execute endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteRequest {
    pub instructions: Vec<String>,
    pub shots: u32,
}

impl ExecuteRequest {
    pub fn new(instructions: Vec<String>, shots: u32) -> Self {
        Self {
            instructions,
            shots: shots.max(1),
        }
    }
}

/// Response body of the execute endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub content: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<(String, String)>,
}

/// Decode an execute response given its HTTP status and raw body
pub fn parse_response(status: u16, body: &str) -> ExecutionResult {
    let success = (200..300).contains(&status);

    match serde_json::from_str::<ExecuteResponse>(body) {
        Ok(ExecuteResponse {
            error: Some((code, message)),
            ..
        }) => Err(ExecutionError::new(code, message)),
        Ok(response) if success => Ok(response.content.unwrap_or_default()),
        Ok(_) => Err(ExecutionError::new(
            ERR_HTTP_STATUS,
            format!("server answered with status {status}"),
        )),
        Err(_) if !success => Err(ExecutionError::new(
            ERR_HTTP_STATUS,
            format!("server answered with status {status}: {}", body.trim()),
        )),
        Err(e) => Err(ExecutionError::new(ERR_BAD_RESPONSE, e.to_string())),
    }
}

/// Something that can execute a program
pub trait Executor: Send + Sync + 'static {
    fn execute(&self, request: ExecuteRequest) -> impl Future<Output = ExecutionResult> + Send;
}

/// Executor posting JSON to a remote HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    url: String,
}

impl HttpExecutor {
    /// Create an executor for the profile's execute endpoint
    pub fn new(profile: &ConsoleProfile) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = profile.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        tracing::info!("Execution client created for {}", profile.execute_url());

        Ok(Self {
            client,
            url: profile.execute_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Executor for HttpExecutor {
    async fn execute(&self, request: ExecuteRequest) -> ExecutionResult {
        tracing::debug!(
            "POST {} ({} instructions, {} shots)",
            self.url,
            request.instructions.len(),
            request.shots
        );

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Execution request failed: {e}");
                ExecutionError::new(ERR_CONNECTION, e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ExecutionError::new(ERR_BAD_RESPONSE, e.to_string()))?;

        parse_response(status, &body)
    }
}

/// Correlation id of one execution request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A request ready to be dispatched, tagged with its correlation id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTicket {
    pub id: RequestId,
    pub request: ExecuteRequest,
}

/// Completion of a dispatched ticket
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionMessage {
    pub id: RequestId,
    pub outcome: ExecutionResult,
}

/// Runs tickets in background tasks and reports completions on a channel
pub struct ExecutionService<E: Executor> {
    executor: Arc<E>,
    /// Channel for receiving completions
    response_receiver: mpsc::Receiver<ExecutionMessage>,
    /// Channel sender cloned into each task
    response_sender: mpsc::Sender<ExecutionMessage>,
}

impl<E: Executor> ExecutionService<E> {
    pub fn new(executor: E) -> Self {
        let (response_sender, response_receiver) = mpsc::channel(16);
        Self {
            executor: Arc::new(executor),
            response_receiver,
            response_sender,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Execute a ticket asynchronously
    ///
    /// Spawns a tokio task; the outcome arrives through [`Self::next_response`]
    /// tagged with the ticket's id.
    pub fn dispatch(&self, ticket: ExecutionTicket) {
        let executor = Arc::clone(&self.executor);
        let result_sender = self.response_sender.clone();
        tracing::info!(
            "Dispatching request {:?} with {} instructions",
            ticket.id,
            ticket.request.instructions.len()
        );

        tokio::spawn(async move {
            let outcome = executor.execute(ticket.request).await;
            // Ignore send errors (receiver might have been dropped)
            let _ = result_sender
                .send(ExecutionMessage {
                    id: ticket.id,
                    outcome,
                })
                .await;
        });
    }

    /// Wait for the next completion
    pub async fn next_response(&mut self) -> Option<ExecutionMessage> {
        self.response_receiver.recv().await
    }
}

/// Execute a whole program source once with `shots` repetitions
pub async fn run_program<E: Executor>(executor: &E, source: &str, shots: u32) -> ExecutionResult {
    let instructions: Vec<String> = source.lines().map(str::to_string).collect();
    tracing::info!(
        "Running program of {} lines with {} shots",
        instructions.len(),
        shots
    );
    executor
        .execute(ExecuteRequest::new(instructions, shots))
        .await
}

/// Format a batch outcome the way the console prints it
pub fn format_outcome(outcome: &ExecutionResult) -> String {
    match outcome {
        Ok(values) => Value::Array(values.clone()).to_string(),
        Err(e) => e.to_string(),
    }
}

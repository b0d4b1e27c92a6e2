//! In-memory executor standing in for the remote execution server

use std::sync::{Arc, Mutex};
use std::time::Duration;

use qline::repl::services::{ExecuteRequest, ExecutionResult, Executor};

type Responder = Box<dyn Fn(&ExecuteRequest) -> ExecutionResult + Send + Sync>;

/// Executor answering from a closure and recording every request
#[derive(Clone)]
pub struct ScriptedExecutor {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<ExecuteRequest>>>,
    delay: Duration,
}

impl ScriptedExecutor {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ExecuteRequest) -> ExecutionResult + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(Box::new(responder)),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Delay every answer, so later input arrives while a read is in flight
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<ExecuteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Executor for ScriptedExecutor {
    async fn execute(&self, request: ExecuteRequest) -> ExecutionResult {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.responder)(&request)
    }
}

//! Operation plumbing shared by every schema command.
//!
//! Commands are structs whose fields ARE the parameters. Each one names
//! itself through [`Operation`] and runs against a context through
//! [`Execute`]. Mutating commands return [`ExecutionResult::Logged`] with a
//! [`LogEntry`] describing the call; read-only commands return
//! [`ExecutionResult::Unlogged`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Names a command as a verb and a noun (e.g. "add field").
pub trait Operation {
    fn verb(&self) -> &'static str;
    fn noun(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Canonical op string (e.g. "set_default category")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute a command against a context.
#[async_trait::async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
{
    type Output: Send;

    async fn execute(&self, ctx: &C) -> ExecutionResult<Self::Output, E>;
}

/// Implement [`Operation`] for a command struct.
macro_rules! impl_operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

pub(crate) use impl_operation;

/// A log entry recording a command execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique ID for this entry (ULID format)
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Canonical op string
    pub op: String,
    /// The command parameters (as JSON)
    pub input: Value,
    /// The result value or error (as JSON)
    pub output: Value,
    pub duration_ms: u64,
}

impl LogEntry {
    pub fn new(op: impl Into<String>, input: Value, output: Value, duration_ms: u64) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            duration_ms,
        }
    }
}

/// Outcome of executing a command.
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Command succeeded and wrote something
    Logged { value: T, log_entry: LogEntry },
    /// Command succeeded without writing (read-only)
    Unlogged { value: T },
    /// Command failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

/// Run a mutating command body and record it as a [`LogEntry`].
pub(crate) async fn logged<O, T, E, F>(op: &O, body: F) -> ExecutionResult<T, E>
where
    O: Operation + Serialize,
    T: Serialize,
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let op_string = op.op_string();
    let input = serde_json::to_value(op).unwrap_or(Value::Null);

    let result = body.await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(value) => {
            debug!(op = %op_string, duration_ms, "operation applied");
            let output = serde_json::to_value(&value).unwrap_or(Value::Null);
            ExecutionResult::Logged {
                value,
                log_entry: LogEntry::new(op_string, input, output, duration_ms),
            }
        }
        Err(error) => {
            let error_msg = error.to_string();
            warn!(op = %op_string, error = %error_msg, "operation failed");
            ExecutionResult::Failed {
                error,
                log_entry: Some(LogEntry::new(
                    op_string,
                    input,
                    serde_json::json!({ "error": error_msg }),
                    duration_ms,
                )),
            }
        }
    }
}

/// Run a read-only command body.
pub(crate) async fn unlogged<T, E, F>(body: F) -> ExecutionResult<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match body.await {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}

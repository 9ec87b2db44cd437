//! One-shot deferred execution with shared-outcome fan-out.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::TaskError;
use crate::registry::{TaskRegistry, TaskValue};

/// Outcome of one scheduled run: `Ok(Some(..))` with the task's value,
/// `Ok(None)` when nothing ran (empty registry or unknown name), or the
/// task's failure.
pub type RunResult = Result<Option<TaskValue>, TaskError>;

/// Observes the single run scheduled when the trigger was built.
///
/// Construction spawns `run(None)` onto the executor, so the task starts
/// without anyone awaiting and never runs inline. Every clone and every
/// [`outcome`] call sees that one run's shared result; nothing ever
/// re-executes. A trigger can also be awaited directly.
///
/// [`outcome`]: ExecutionTrigger::outcome
#[derive(Clone)]
pub struct ExecutionTrigger {
    outcome: watch::Receiver<Option<Arc<RunResult>>>,
}

impl ExecutionTrigger {
    /// Spawn the registry's selected run and return its observer.
    pub fn schedule(tasks: TaskRegistry) -> Self {
        let (tx, rx) = watch::channel(None);
        tokio::spawn(async move {
            let result = tasks.run(None).await;
            // Every observer may already be gone; the run still counts.
            let _ = tx.send(Some(Arc::new(result)));
        });
        Self { outcome: rx }
    }

    /// Wait for the scheduled run's outcome. Multi-awaitable: every caller
    /// gets the same shared result.
    pub async fn outcome(&self) -> Arc<RunResult> {
        let mut rx = self.outcome.clone();
        match rx.wait_for(Option::is_some).await {
            Ok(slot) => slot
                .clone()
                .unwrap_or_else(|| Arc::new(Err(TaskError::Aborted))),
            // The publishing task was dropped before sending.
            Err(_) => Arc::new(Err(TaskError::Aborted)),
        }
    }
}

impl IntoFuture for ExecutionTrigger {
    type Output = Arc<RunResult>;
    type IntoFuture = Pin<Box<dyn Future<Output = Arc<RunResult>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.outcome().await })
    }
}

//! Detached Tokio task dispatcher.

use tokio::runtime::Handle;

use crate::interaction::domain::DeferredJob;
use crate::interaction::ports::{DeferredDispatcher, DispatchError};
use crate::interaction::services::DeferredExecutor;

/// Runs each deferred job on its own detached Tokio task.
///
/// Failures are logged by the executor and never reach the router.
#[derive(Clone)]
pub struct TokioDispatcher {
    executor: DeferredExecutor,
}

impl TokioDispatcher {
    /// Creates a dispatcher running jobs with `executor`.
    #[must_use]
    pub const fn new(executor: DeferredExecutor) -> Self {
        Self { executor }
    }
}

impl DeferredDispatcher for TokioDispatcher {
    fn dispatch(&self, job: DeferredJob) -> Result<(), DispatchError> {
        let runtime =
            Handle::try_current().map_err(|err| DispatchError::RuntimeUnavailable(err.to_string()))?;
        let executor = self.executor.clone();
        runtime.spawn(async move {
            executor.execute_logged(&job).await;
        });
        Ok(())
    }
}

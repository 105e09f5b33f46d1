//! Dispatch port for the asynchronous half of deferred commands.

use thiserror::Error;

use crate::interaction::domain::DeferredJob;

/// Hands a deferred job to whatever will run it.
///
/// `dispatch` must return without waiting for the job to run. Whether the
/// job survives the current request is up to the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait DeferredDispatcher: Send + Sync {
    /// Schedules the job.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the job cannot be scheduled.
    fn dispatch(&self, job: DeferredJob) -> Result<(), DispatchError>;
}

/// Errors returned when scheduling a deferred job.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No async runtime is available to run the job.
    #[error("no async runtime available: {0}")]
    RuntimeUnavailable(String),

    /// The queue consumer has shut down.
    #[error("deferred job queue is closed")]
    QueueClosed,
}

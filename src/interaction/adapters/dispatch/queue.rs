//! In-process queue dispatcher with a retrying worker.

use std::num::NonZeroU32;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::interaction::domain::DeferredJob;
use crate::interaction::ports::{DeferredDispatcher, DispatchError};
use crate::interaction::services::{DeferredExecutionError, DeferredExecutor};

/// Creates a connected dispatcher and worker.
///
/// The worker makes at most `max_attempts` attempts per job.
#[must_use]
pub fn deferred_queue(
    executor: DeferredExecutor,
    max_attempts: NonZeroU32,
) -> (QueueDispatcher, DeferredWorker) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        QueueDispatcher { sender },
        DeferredWorker {
            receiver,
            executor,
            max_attempts,
            retry_delay: Duration::ZERO,
        },
    )
}

/// Enqueues deferred jobs for a [`DeferredWorker`].
#[derive(Debug, Clone)]
pub struct QueueDispatcher {
    sender: mpsc::UnboundedSender<DeferredJob>,
}

impl DeferredDispatcher for QueueDispatcher {
    fn dispatch(&self, job: DeferredJob) -> Result<(), DispatchError> {
        self.sender
            .send(job)
            .map_err(|_| DispatchError::QueueClosed)
    }
}

/// Result of processing one queued job.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// The job completed.
    Completed {
        /// Attempts made, including the successful one.
        attempts: u32,
    },
    /// Every attempt failed and the job was dropped.
    Abandoned {
        /// Attempts made.
        attempts: u32,
        /// Error of the last attempt.
        error: DeferredExecutionError,
    },
}

/// Drains the queue, running each job until it succeeds or runs out of
/// attempts.
///
/// Jobs are processed one at a time in arrival order, so handlers see
/// at-least-once delivery. A failing job keeps the worker busy for all of
/// its attempts and backoff delays; later jobs wait behind it. Retries are
/// immediate unless [`DeferredWorker::with_retry_delay`] sets a backoff.
pub struct DeferredWorker {
    receiver: mpsc::UnboundedReceiver<DeferredJob>,
    executor: DeferredExecutor,
    max_attempts: NonZeroU32,
    retry_delay: Duration,
}

impl DeferredWorker {
    /// Waits before each retry, doubling `delay` after every failed
    /// attempt.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    const fn backoff(&self, failed_attempts: u32) -> Duration {
        let factor = 2_u32.saturating_pow(failed_attempts.saturating_sub(1));
        self.retry_delay.saturating_mul(factor)
    }

    /// Processes the next job, waiting for one to arrive.
    ///
    /// Returns `None` once every dispatcher has been dropped and the queue
    /// is empty.
    pub async fn process_next(&mut self) -> Option<JobOutcome> {
        let job = self.receiver.recv().await?;
        Some(self.process(&job).await)
    }

    /// Processes jobs until the queue closes, returning how many were
    /// received.
    pub async fn run(mut self) -> usize {
        let mut processed = 0;
        while self.process_next().await.is_some() {
            processed += 1;
        }
        processed
    }

    async fn process(&self, job: &DeferredJob) -> JobOutcome {
        let max_attempts = self.max_attempts.get();
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.executor.execute(job).await {
                Ok(_) => return JobOutcome::Completed { attempts },
                Err(err) if attempts < max_attempts => {
                    warn!(
                        command = job.command_name(),
                        interaction_id = job.interaction_id(),
                        attempts,
                        error = %err,
                        "deferred command failed, retrying"
                    );
                    let delay = self.backoff(attempts);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(err) => {
                    error!(
                        command = job.command_name(),
                        interaction_id = job.interaction_id(),
                        attempts,
                        error = %err,
                        "deferred command abandoned"
                    );
                    return JobOutcome::Abandoned {
                        attempts,
                        error: err,
                    };
                }
            }
        }
    }
}

//! Dispatchers that run the asynchronous half of deferred commands.
//!
//! - [`TokioDispatcher`] spawns a detached task per job. The task only
//!   survives as long as the host process keeps running.
//! - [`QueueDispatcher`] pushes jobs onto a channel drained by a
//!   [`DeferredWorker`], which retries failed jobs up to an attempt limit.

mod queue;
mod spawn;

pub use queue::{DeferredWorker, JobOutcome, QueueDispatcher, deferred_queue};
pub use spawn::TokioDispatcher;

//! Execution of the asynchronous half of deferred commands.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::command::domain::CommandCapability;
use crate::command::ports::HandlerError;
use crate::command::services::CommandRegistry;
use crate::interaction::domain::DeferredJob;
use crate::interaction::ports::{DiscordApiClient, DiscordApiError};

/// Errors returned while running a deferred job.
#[derive(Debug, Clone, Error)]
pub enum DeferredExecutionError {
    /// The job names a command that is not registered.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// The job names a command that is not deferred.
    #[error("command '{0}' is not a deferred command")]
    NotDeferred(String),

    /// The async handler failed.
    #[error("deferred command '{command}' failed: {source}")]
    Handler {
        /// Command name.
        command: String,
        /// Handler failure.
        source: HandlerError,
    },

    /// The follow-up edit was rejected.
    #[error("follow-up edit for command '{command}' failed: {source}")]
    FollowUp {
        /// Command name.
        command: String,
        /// API failure.
        source: DiscordApiError,
    },
}

/// Runs deferred jobs and pushes their result as a follow-up edit.
///
/// Usable in process by a dispatcher or directly by an out-of-process
/// queue consumer. A job may be executed more than once.
#[derive(Clone)]
pub struct DeferredExecutor {
    registry: Arc<CommandRegistry>,
    api: Arc<dyn DiscordApiClient>,
}

impl DeferredExecutor {
    /// Creates an executor.
    #[must_use]
    pub const fn new(registry: Arc<CommandRegistry>, api: Arc<dyn DiscordApiClient>) -> Self {
        Self { registry, api }
    }

    /// Runs the job's command and edits the original response with its
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`DeferredExecutionError`] when the command cannot be
    /// resolved, its handler fails, or Discord rejects the edit.
    pub async fn execute(&self, job: &DeferredJob) -> Result<Value, DeferredExecutionError> {
        let name = job.command_name();
        let command = self
            .registry
            .lookup(name)
            .map_err(|_| DeferredExecutionError::CommandNotFound(name.to_owned()))?;
        let CommandCapability::Deferred(handler) = command.capability() else {
            return Err(DeferredExecutionError::NotDeferred(name.to_owned()));
        };

        let interaction = job.interaction();
        let body = handler
            .handle_interaction_async(interaction)
            .await
            .map_err(|source| DeferredExecutionError::Handler {
                command: name.to_owned(),
                source,
            })?;
        self.api
            .edit_original_interaction_response(
                &interaction.application_id,
                &interaction.token,
                &body,
            )
            .await
            .map_err(|source| DeferredExecutionError::FollowUp {
                command: name.to_owned(),
                source,
            })
    }

    /// Runs the job, logging the outcome instead of returning it.
    pub async fn execute_logged(&self, job: &DeferredJob) {
        match self.execute(job).await {
            Ok(_) => info!(
                command = job.command_name(),
                interaction_id = job.interaction_id(),
                "deferred command completed"
            ),
            Err(err) => error!(
                command = job.command_name(),
                interaction_id = job.interaction_id(),
                error = %err,
                "deferred command failed"
            ),
        }
    }
}

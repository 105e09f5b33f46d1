//! Synchronous and deferred command handler contracts.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::interaction::domain::{ApplicationCommandInteraction, InteractionResponse, MessageData};

/// Result type for handler operations.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Handler that produces the complete interaction response inline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handles an application-command interaction.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the command cannot produce a response.
    async fn handle_interaction(
        &self,
        interaction: &ApplicationCommandInteraction,
    ) -> HandlerResult<InteractionResponse>;
}

/// Handler that acknowledges immediately and delivers its result later.
///
/// The router answers Discord with a deferred channel message built from
/// [`DeferredCommandHandler::acknowledge`], then schedules
/// [`DeferredCommandHandler::handle_interaction_async`] whose result
/// replaces the original response through a follow-up edit. The async half
/// may be delivered more than once when a queue redelivers a failed job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeferredCommandHandler: Send + Sync {
    /// Returns the placeholder shown while the real work runs.
    ///
    /// Defaults to a message containing `"..."`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the placeholder cannot be built.
    async fn acknowledge(
        &self,
        _interaction: &ApplicationCommandInteraction,
    ) -> HandlerResult<MessageData> {
        Ok(MessageData::deferred_placeholder())
    }

    /// Performs the real work and returns the final message content.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the work fails. The failure is logged
    /// and never affects the acknowledgement already sent.
    async fn handle_interaction_async(
        &self,
        interaction: &ApplicationCommandInteraction,
    ) -> HandlerResult<MessageData>;
}

/// Errors reported by command handlers.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// Handler reported a failure message.
    #[error("command handler failed: {0}")]
    Message(String),

    /// Handler propagated an underlying error.
    #[error("command handler failed: {0}")]
    Failed(Arc<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Creates an error from a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wraps an underlying error.
    pub fn failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Failed(Arc::new(err))
    }
}

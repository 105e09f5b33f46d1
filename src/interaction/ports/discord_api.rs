//! Outbound Discord REST API port.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::CommandRegistrationPayload;
use crate::interaction::domain::{InteractionResponse, MessageData};

/// Result type for Discord API calls.
pub type DiscordApiResult<T> = Result<T, DiscordApiError>;

/// Calls the router and registrar make against the Discord REST API.
///
/// Implementations may be called concurrently from several in-flight
/// deferred jobs and registration batches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscordApiClient: Send + Sync {
    /// Creates (or updates) one global command.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordApiError`] on a non-success status or transport
    /// failure.
    async fn create_global_command(
        &self,
        application_id: &str,
        command: &CommandRegistrationPayload,
    ) -> DiscordApiResult<Value>;

    /// Replaces every global command with `commands`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordApiError`] on a non-success status or transport
    /// failure.
    async fn bulk_overwrite_global_commands(
        &self,
        application_id: &str,
        commands: &[CommandRegistrationPayload],
    ) -> DiscordApiResult<Value>;

    /// Replaces every command of one guild with `commands`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordApiError`] on a non-success status or transport
    /// failure.
    async fn bulk_overwrite_guild_commands(
        &self,
        application_id: &str,
        guild_id: &str,
        commands: &[CommandRegistrationPayload],
    ) -> DiscordApiResult<Value>;

    /// Edits the original response of an interaction.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordApiError`] on a non-success status, which includes
    /// an expired interaction token.
    async fn edit_original_interaction_response(
        &self,
        application_id: &str,
        interaction_token: &str,
        body: &MessageData,
    ) -> DiscordApiResult<Value>;

    /// Fetches the original response of an interaction.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordApiError`] on a non-success status or transport
    /// failure.
    async fn get_original_interaction_response(
        &self,
        application_id: &str,
        interaction_token: &str,
    ) -> DiscordApiResult<Value>;

    /// Sends an interaction response through the callback endpoint instead
    /// of the webhook reply.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordApiError`] unless Discord answers `204 No Content`.
    async fn create_interaction_response(
        &self,
        interaction_id: &str,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> DiscordApiResult<()>;
}

/// Errors returned by Discord API clients.
#[derive(Debug, Clone, Error)]
pub enum DiscordApiError {
    /// Discord answered with an unexpected status.
    #[error("discord api returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request could not be sent or the response not read.
    #[error("discord api transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body was not valid JSON.
    #[error("discord api response decode error: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl DiscordApiError {
    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a decode error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Returns the HTTP status for status errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

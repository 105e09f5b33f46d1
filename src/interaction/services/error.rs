//! Error taxonomy of the interaction router.

use thiserror::Error;

use crate::command::ports::HandlerError;
use crate::interaction::domain::InteractionType;
use crate::interaction::ports::DispatchError;

/// Result type for router operations.
pub type InteractionResult<T> = Result<T, InteractionError>;

/// Terminal failures of one `handle` call.
///
/// Every variant maps to a single HTTP status through
/// [`InteractionError::status_code`]. The reason phrase returned to
/// Discord never includes the variant's detail.
#[derive(Debug, Clone, Error)]
pub enum InteractionError {
    /// The signature or timestamp header is absent.
    #[error("authentication headers missing")]
    AuthenticationHeadersMissing,

    /// The signature does not verify.
    #[error("unauthorized")]
    Unauthorized,

    /// The payload is not a recognised interaction.
    #[error("invalid interaction type")]
    InvalidInteractionType,

    /// An application command whose body could not be decoded.
    #[error("malformed {kind} interaction: {reason}")]
    MalformedInteraction {
        /// Interaction type announced by the payload.
        kind: InteractionType,
        /// Decoding failure.
        reason: String,
    },

    /// No registered command has the invoked name.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// The interaction type is recognised but not handled.
    #[error("interaction type not implemented: {0}")]
    NotImplemented(InteractionType),

    /// A deferred command was invoked without a dispatcher configured.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// A synchronous handler or acknowledgement failed.
    #[error("command '{command}' failed: {source}")]
    Handler {
        /// Command name.
        command: String,
        /// Handler failure.
        source: HandlerError,
    },

    /// The deferred dispatcher refused the job.
    #[error("failed to dispatch deferred command '{command}': {source}")]
    Dispatch {
        /// Command name.
        command: String,
        /// Dispatcher failure.
        source: DispatchError,
    },
}

impl InteractionError {
    /// Returns the HTTP status a platform adapter should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AuthenticationHeadersMissing | Self::Unauthorized => 401,
            Self::InvalidInteractionType | Self::MalformedInteraction { .. } => 400,
            Self::NotImplemented(_) => 501,
            Self::CommandNotFound(_)
            | Self::MissingCollaborator(_)
            | Self::Handler { .. }
            | Self::Dispatch { .. } => 500,
        }
    }

    /// Returns the fixed reason phrase sent in the response body.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.status_code() {
            401 => "Unauthorized",
            400 => "Bad Request",
            501 => "Not Implemented",
            _ => "Internal Server Error",
        }
    }
}

//! Error types for command definition validation.

use thiserror::Error;

/// Errors returned while validating command definitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandDomainError {
    /// The command name is empty.
    #[error("command name must not be empty")]
    EmptyName,

    /// The command name exceeds Discord's 32-character limit.
    #[error("command name '{0}' exceeds 32 characters")]
    NameTooLong(String),

    /// A chat-input command name contains uppercase letters or whitespace.
    #[error("chat input command name '{0}' must be lowercase without whitespace")]
    InvalidChatInputName(String),

    /// A chat-input command has an empty description.
    #[error("chat input command '{0}' requires a description")]
    MissingDescription(String),

    /// The description exceeds Discord's 100-character limit.
    #[error("description of command '{0}' exceeds 100 characters")]
    DescriptionTooLong(String),

    /// Options were supplied for a user or message context-menu command.
    #[error("command '{0}' is not a chat input command and cannot declare options")]
    OptionsNotSupported(String),

    /// More than 25 options were declared.
    #[error("command '{0}' declares more than 25 options")]
    TooManyOptions(String),

    /// Two options on the same command share a name.
    #[error("command '{command}' declares option '{option}' more than once")]
    DuplicateOption {
        /// Command name.
        command: String,
        /// Duplicated option name.
        option: String,
    },

    /// An option name or description is out of bounds.
    #[error("option '{option}' of command '{command}' is invalid: {reason}")]
    InvalidOption {
        /// Command name.
        command: String,
        /// Option name.
        option: String,
        /// Validation reason.
        reason: String,
    },
}

/// Error returned when a numeric wire value has no matching enumeration
/// variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct ParseDiscriminantError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// The rejected wire value.
    pub value: u8,
}

impl ParseDiscriminantError {
    /// Creates an error for an unknown discriminant.
    #[must_use]
    pub const fn new(kind: &'static str, value: u8) -> Self {
        Self { kind, value }
    }
}

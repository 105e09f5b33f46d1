//! Interaction type discriminant.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::command::domain::ParseDiscriminantError;

/// The five kinds of interaction Discord delivers to a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum InteractionType {
    /// Endpoint health check sent by Discord.
    Ping,
    /// Slash or context-menu command invocation.
    ApplicationCommand,
    /// Button press or select-menu choice.
    MessageComponent,
    /// Partial command input awaiting suggestions.
    ApplicationCommandAutocomplete,
    /// Submitted modal form.
    ModalSubmit,
}

impl TryFrom<u8> for InteractionType {
    type Error = ParseDiscriminantError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            3 => Ok(Self::MessageComponent),
            4 => Ok(Self::ApplicationCommandAutocomplete),
            5 => Ok(Self::ModalSubmit),
            other => Err(ParseDiscriminantError::new("interaction type", other)),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::ApplicationCommandAutocomplete => 4,
            InteractionType::ModalSubmit => 5,
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ping => "ping",
            Self::ApplicationCommand => "application_command",
            Self::MessageComponent => "message_component",
            Self::ApplicationCommandAutocomplete => "application_command_autocomplete",
            Self::ModalSubmit => "modal_submit",
        };
        f.write_str(label)
    }
}

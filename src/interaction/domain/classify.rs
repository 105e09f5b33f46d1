//! Classification of untyped payloads into typed interactions.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    ApplicationCommandInteraction, AutocompleteInteraction, Interaction, InteractionType,
    MessageComponentInteraction, ModalSubmitInteraction, PingInteraction,
};

/// An inbound payload narrowed by its `type` discriminant.
///
/// Exactly one variant applies to any payload; classification never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedInteraction {
    /// Endpoint health check.
    Ping(PingInteraction),
    /// Command invocation.
    ApplicationCommand(ApplicationCommandInteraction),
    /// Component interaction.
    MessageComponent(MessageComponentInteraction),
    /// Autocomplete request.
    Autocomplete(AutocompleteInteraction),
    /// Modal submission.
    ModalSubmit(ModalSubmitInteraction),
    /// Known `type` whose body holds values of the wrong JSON type, such as
    /// a numeric `token` or a string `data`.
    Malformed {
        /// Interaction type announced by the payload.
        kind: InteractionType,
        /// Why the body could not be decoded.
        reason: String,
    },
    /// Missing or unknown `type`.
    Unrecognized,
}

impl ClassifiedInteraction {
    /// Classifies a parsed JSON payload.
    ///
    /// Only the `type` discriminant decides the outcome. Absent fields take
    /// their defaults and nested objects are not deep-validated; a body
    /// that still cannot be decoded is [`Self::Malformed`], never
    /// [`Self::Unrecognized`].
    #[must_use]
    pub fn classify(payload: &Value) -> Self {
        let Some(kind) = payload
            .get("type")
            .and_then(Value::as_u64)
            .and_then(|raw| u8::try_from(raw).ok())
            .and_then(|raw| InteractionType::try_from(raw).ok())
        else {
            return Self::Unrecognized;
        };

        let classified = match kind {
            InteractionType::Ping => narrow(payload).map(Self::Ping),
            InteractionType::ApplicationCommand => narrow(payload).map(Self::ApplicationCommand),
            InteractionType::MessageComponent => narrow(payload).map(Self::MessageComponent),
            InteractionType::ApplicationCommandAutocomplete => {
                narrow(payload).map(Self::Autocomplete)
            }
            InteractionType::ModalSubmit => narrow(payload).map(Self::ModalSubmit),
        };
        classified.unwrap_or_else(|reason| Self::Malformed { kind, reason })
    }

    /// Parses and classifies a raw request body.
    ///
    /// Bodies that are not valid JSON are [`Self::Unrecognized`].
    #[must_use]
    pub fn from_slice(raw_body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(raw_body)
            .map_or(Self::Unrecognized, |payload| Self::classify(&payload))
    }

    /// Returns the interaction type, or `None` when unrecognized.
    #[must_use]
    pub const fn kind(&self) -> Option<InteractionType> {
        match self {
            Self::Ping(_) => Some(InteractionType::Ping),
            Self::ApplicationCommand(_) => Some(InteractionType::ApplicationCommand),
            Self::MessageComponent(_) => Some(InteractionType::MessageComponent),
            Self::Autocomplete(_) => Some(InteractionType::ApplicationCommandAutocomplete),
            Self::ModalSubmit(_) => Some(InteractionType::ModalSubmit),
            Self::Malformed { kind, .. } => Some(*kind),
            Self::Unrecognized => None,
        }
    }

    /// Returns the interaction id, or `None` when the body was not decoded.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Ping(interaction) => Some(&interaction.id),
            Self::ApplicationCommand(interaction) => Some(&interaction.id),
            Self::MessageComponent(interaction) => Some(&interaction.id),
            Self::Autocomplete(interaction) => Some(&interaction.id),
            Self::ModalSubmit(interaction) => Some(&interaction.id),
            Self::Malformed { .. } | Self::Unrecognized => None,
        }
    }
}

fn narrow<D>(payload: &Value) -> Result<Interaction<D>, String>
where
    D: DeserializeOwned + Default,
{
    Interaction::<D>::deserialize(payload).map_err(|err| err.to_string())
}

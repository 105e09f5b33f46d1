//! Interaction responses returned to Discord.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::command::domain::{CommandOptionChoice, ParseDiscriminantError};

/// Content of the acknowledgement sent for deferred commands.
pub const DEFERRED_PLACEHOLDER: &str = "...";

const EPHEMERAL_FLAG: u64 = 1 << 6;

/// Interaction callback type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum InteractionResponseType {
    /// Acknowledges a ping.
    Pong,
    /// Replies with a message.
    ChannelMessageWithSource,
    /// Acknowledges now; the message is edited in later.
    DeferredChannelMessageWithSource,
    /// Acknowledges a component; the message is edited in later.
    DeferredUpdateMessage,
    /// Edits the message a component is attached to.
    UpdateMessage,
    /// Returns autocomplete suggestions.
    ApplicationCommandAutocompleteResult,
    /// Opens a modal.
    Modal,
}

impl TryFrom<u8> for InteractionResponseType {
    type Error = ParseDiscriminantError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            5 => Ok(Self::DeferredChannelMessageWithSource),
            6 => Ok(Self::DeferredUpdateMessage),
            7 => Ok(Self::UpdateMessage),
            8 => Ok(Self::ApplicationCommandAutocompleteResult),
            9 => Ok(Self::Modal),
            other => Err(ParseDiscriminantError::new("interaction response type", other)),
        }
    }
}

impl From<InteractionResponseType> for u8 {
    fn from(value: InteractionResponseType) -> Self {
        match value {
            InteractionResponseType::Pong => 1,
            InteractionResponseType::ChannelMessageWithSource => 4,
            InteractionResponseType::DeferredChannelMessageWithSource => 5,
            InteractionResponseType::DeferredUpdateMessage => 6,
            InteractionResponseType::UpdateMessage => 7,
            InteractionResponseType::ApplicationCommandAutocompleteResult => 8,
            InteractionResponseType::Modal => 9,
        }
    }
}

/// Message body used by message responses and follow-up edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    /// Whether the message is read aloud.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    /// Message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Embeds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Value>,
    /// Allowed mentions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<Value>,
    /// Message flags bit set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Component rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Value>,
    /// Attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Value>,
}

impl MessageData {
    /// Creates a text message.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Creates the default deferred acknowledgement body.
    #[must_use]
    pub fn deferred_placeholder() -> Self {
        Self::content(DEFERRED_PLACEHOLDER)
    }

    /// Marks the message as visible to the invoking user only.
    #[must_use]
    pub fn ephemeral(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or_default() | EPHEMERAL_FLAG);
        self
    }
}

/// Suggestions answered to an autocomplete interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteResultData {
    /// Suggested choices, at most 25.
    pub choices: Vec<CommandOptionChoice>,
}

/// Modal opened in response to an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalData {
    /// Developer-defined modal id.
    pub custom_id: String,
    /// Modal title.
    pub title: String,
    /// Text-input rows.
    pub components: Vec<Value>,
}

/// Response returned for an interaction.
///
/// Each variant carries exactly the data its callback type allows, so a
/// response whose data does not match its type cannot be built. On the
/// wire it is `{"type": <n>, "data": {...}}` with `data` omitted when
/// absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawInteractionResponse")]
pub enum InteractionResponse {
    /// Reply to a ping; never carries data.
    Pong,
    /// Immediate message reply.
    ChannelMessageWithSource(MessageData),
    /// Placeholder acknowledgement, edited later.
    DeferredChannelMessageWithSource(Option<MessageData>),
    /// Component acknowledgement, edited later.
    DeferredUpdateMessage,
    /// Edit of the component's message.
    UpdateMessage(MessageData),
    /// Autocomplete suggestions.
    AutocompleteResult(AutocompleteResultData),
    /// Modal to open.
    Modal(ModalData),
}

impl InteractionResponse {
    /// Creates the reply to a ping.
    #[must_use]
    pub const fn pong() -> Self {
        Self::Pong
    }

    /// Creates an immediate text reply.
    #[must_use]
    pub fn message(content: impl Into<String>) -> Self {
        Self::ChannelMessageWithSource(MessageData::content(content))
    }

    /// Creates a deferred acknowledgement with the given placeholder.
    #[must_use]
    pub const fn deferred(placeholder: MessageData) -> Self {
        Self::DeferredChannelMessageWithSource(Some(placeholder))
    }

    /// Returns the callback type.
    #[must_use]
    pub const fn response_type(&self) -> InteractionResponseType {
        match self {
            Self::Pong => InteractionResponseType::Pong,
            Self::ChannelMessageWithSource(_) => InteractionResponseType::ChannelMessageWithSource,
            Self::DeferredChannelMessageWithSource(_) => {
                InteractionResponseType::DeferredChannelMessageWithSource
            }
            Self::DeferredUpdateMessage => InteractionResponseType::DeferredUpdateMessage,
            Self::UpdateMessage(_) => InteractionResponseType::UpdateMessage,
            Self::AutocompleteResult(_) => {
                InteractionResponseType::ApplicationCommandAutocompleteResult
            }
            Self::Modal(_) => InteractionResponseType::Modal,
        }
    }
}

#[derive(Serialize)]
struct ResponseBody<'a, T> {
    #[serde(rename = "type")]
    kind: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
}

impl Serialize for InteractionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.response_type();
        match self {
            Self::Pong | Self::DeferredUpdateMessage => {
                ResponseBody::<MessageData> { kind, data: None }.serialize(serializer)
            }
            Self::ChannelMessageWithSource(data) | Self::UpdateMessage(data) => ResponseBody {
                kind,
                data: Some(data),
            }
            .serialize(serializer),
            Self::DeferredChannelMessageWithSource(data) => ResponseBody {
                kind,
                data: data.as_ref(),
            }
            .serialize(serializer),
            Self::AutocompleteResult(data) => ResponseBody {
                kind,
                data: Some(data),
            }
            .serialize(serializer),
            Self::Modal(data) => ResponseBody {
                kind,
                data: Some(data),
            }
            .serialize(serializer),
        }
    }
}

/// Error returned when a response's `data` does not match its `type`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid data for response type {kind:?}: {reason}")]
pub struct InvalidResponseShape {
    /// Callback type of the rejected response.
    pub kind: InteractionResponseType,
    /// Why the data was rejected.
    pub reason: String,
}

#[derive(Deserialize)]
struct RawInteractionResponse {
    #[serde(rename = "type")]
    kind: InteractionResponseType,
    #[serde(default)]
    data: Option<Value>,
}

impl TryFrom<RawInteractionResponse> for InteractionResponse {
    type Error = InvalidResponseShape;

    fn try_from(raw: RawInteractionResponse) -> Result<Self, Self::Error> {
        let RawInteractionResponse { kind, data } = raw;
        match kind {
            InteractionResponseType::Pong => reject_data(kind, data).map(|()| Self::Pong),
            InteractionResponseType::DeferredUpdateMessage => {
                reject_data(kind, data).map(|()| Self::DeferredUpdateMessage)
            }
            InteractionResponseType::ChannelMessageWithSource => {
                require_data(kind, data).map(Self::ChannelMessageWithSource)
            }
            InteractionResponseType::DeferredChannelMessageWithSource => data
                .map(|value| decode(kind, value))
                .transpose()
                .map(Self::DeferredChannelMessageWithSource),
            InteractionResponseType::UpdateMessage => {
                require_data(kind, data).map(Self::UpdateMessage)
            }
            InteractionResponseType::ApplicationCommandAutocompleteResult => {
                require_data(kind, data).map(Self::AutocompleteResult)
            }
            InteractionResponseType::Modal => require_data(kind, data).map(Self::Modal),
        }
    }
}

fn reject_data(
    kind: InteractionResponseType,
    data: Option<Value>,
) -> Result<(), InvalidResponseShape> {
    match data {
        None | Some(Value::Null) => Ok(()),
        Some(_) => Err(InvalidResponseShape {
            kind,
            reason: "this response type carries no data".to_owned(),
        }),
    }
}

fn require_data<T: serde::de::DeserializeOwned>(
    kind: InteractionResponseType,
    data: Option<Value>,
) -> Result<T, InvalidResponseShape> {
    let value = data.ok_or_else(|| InvalidResponseShape {
        kind,
        reason: "data is required".to_owned(),
    })?;
    decode(kind, value)
}

fn decode<T: serde::de::DeserializeOwned>(
    kind: InteractionResponseType,
    value: Value,
) -> Result<T, InvalidResponseShape> {
    serde_json::from_value(value).map_err(|error| InvalidResponseShape {
        kind,
        reason: error.to_string(),
    })
}

//! Typed interaction payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::InteractionType;
use crate::command::domain::{CommandOptionType, CommandType};

/// Interaction envelope shared by every interaction type.
///
/// `D` is the type-specific `data` shape. Nested Discord objects that the
/// router never inspects (messages, resolved entities, components) are kept
/// as raw JSON.
///
/// Only `type` is required. Missing envelope fields and a missing `data`
/// object decode to their defaults, so a payload with a known `type` is
/// never rejected for being sparse; handlers decide what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction<D> {
    /// Interaction id.
    #[serde(default)]
    pub id: String,
    /// Id of the application the interaction is for.
    #[serde(default)]
    pub application_id: String,
    /// Interaction type discriminant.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Continuation token used for follow-up calls.
    #[serde(default)]
    pub token: String,
    /// Payload version, always `1`.
    #[serde(default)]
    pub version: u8,
    /// Guild the interaction was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    /// Channel the interaction was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Invoking member, for guild interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
    /// Invoking user, for direct-message interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Message a component was attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    /// Permission bit set the application has in the channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_permissions: Option<String>,
    /// Locale of the invoking user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Preferred locale of the guild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<String>,
    /// Type-specific data.
    #[serde(default)]
    pub data: D,
}

impl<D> Interaction<D> {
    /// Returns the user who triggered the interaction, whether it came from
    /// a guild (through the member) or a direct message.
    #[must_use]
    pub fn invoking_user(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }
}

/// Ping interaction; carries no data.
pub type PingInteraction = Interaction<Option<Value>>;
/// Application-command interaction.
pub type ApplicationCommandInteraction = Interaction<ApplicationCommandData>;
/// Autocomplete interaction.
pub type AutocompleteInteraction = Interaction<AutocompleteData>;
/// Message-component interaction.
pub type MessageComponentInteraction = Interaction<MessageComponentData>;
/// Modal-submit interaction.
pub type ModalSubmitInteraction = Interaction<ModalSubmitData>;

/// Discord user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: String,
    /// Username.
    pub username: String,
    /// Legacy discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    /// Whether the user is a bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
}

/// Guild member who invoked an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMember {
    /// The member's user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Guild nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Role ids.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Permission bit set in the channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

/// Data of an application-command interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationCommandData {
    /// Registered command id.
    #[serde(default)]
    pub id: String,
    /// Command name used for dispatch.
    #[serde(default)]
    pub name: String,
    /// Command kind, `None` for kinds this crate does not model.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "known_discriminant",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<CommandType>,
    /// Guild the command is registered in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    /// Target user or message of a context-menu command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    /// Supplied options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    /// Resolved users, members, roles, channels, messages, attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Value>,
}

impl ApplicationCommandData {
    /// Finds a top-level option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&InteractionDataOption> {
        self.options.iter().find(|option| option.name == name)
    }
}

/// Option value supplied with a command invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionDataOption {
    /// Option name.
    #[serde(default)]
    pub name: String,
    /// Option value type, `None` for types this crate does not model.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "known_discriminant",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<CommandOptionType>,
    /// Supplied value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Nested options of a sub-command or group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    /// Whether this option has focus during autocomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
}

impl InteractionDataOption {
    /// Returns the value as a string slice, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_str)
    }

    /// Returns the value as an integer, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_ref().and_then(Value::as_i64)
    }

    /// Returns the value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_ref().and_then(Value::as_bool)
    }
}

/// Partial command data sent while the user is still typing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteData {
    /// Registered command id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Command name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Options typed so far.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
}

impl AutocompleteData {
    /// Returns the option currently being typed.
    #[must_use]
    pub fn focused_option(&self) -> Option<&InteractionDataOption> {
        self.options
            .iter()
            .find(|option| option.focused == Some(true))
    }
}

/// Data of a message-component interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageComponentData {
    /// Developer-defined component id.
    #[serde(default)]
    pub custom_id: String,
    /// Component type discriminant.
    #[serde(default)]
    pub component_type: u8,
    /// Selected values of a select menu.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// Data of a modal-submit interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalSubmitData {
    /// Developer-defined modal id.
    #[serde(default)]
    pub custom_id: String,
    /// Submitted component rows.
    #[serde(default)]
    pub components: Vec<Value>,
}

/// Decodes a wire discriminant, yielding `None` for values that are absent
/// or unknown instead of failing the whole payload.
fn known_discriminant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(T::deserialize(raw).ok())
}

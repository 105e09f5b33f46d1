//! Command definitions and the payload registered with Discord.

use serde::{Deserialize, Serialize};

use super::option::validate_options;
use super::{CommandDomainError, CommandOption, ParseDiscriminantError};

const MAX_NAME_LENGTH: usize = 32;
const MAX_DESCRIPTION_LENGTH: usize = 100;
const MAX_OPTIONS: usize = 25;

/// Kind of application command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CommandType {
    /// Slash command typed into the chat input.
    ChatInput,
    /// Context-menu command on a user.
    User,
    /// Context-menu command on a message.
    Message,
}

impl TryFrom<u8> for CommandType {
    type Error = ParseDiscriminantError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ChatInput),
            2 => Ok(Self::User),
            3 => Ok(Self::Message),
            other => Err(ParseDiscriminantError::new("command type", other)),
        }
    }
}

impl From<CommandType> for u8 {
    fn from(value: CommandType) -> Self {
        match value {
            CommandType::ChatInput => 1,
            CommandType::User => 2,
            CommandType::Message => 3,
        }
    }
}

/// Metadata describing an application command.
///
/// The guild list is an ordered set: an empty list makes the command
/// global, otherwise it is registered once per listed guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    name: String,
    kind: CommandType,
    description: String,
    options: Vec<CommandOption>,
    guilds: Vec<String>,
}

impl CommandDefinition {
    /// Creates a chat-input (slash) command definition.
    #[must_use]
    pub fn chat_input(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(CommandType::ChatInput, name, description)
    }

    /// Creates a user context-menu command definition.
    #[must_use]
    pub fn user(name: impl Into<String>) -> Self {
        Self::new(CommandType::User, name, String::new())
    }

    /// Creates a message context-menu command definition.
    #[must_use]
    pub fn message(name: impl Into<String>) -> Self {
        Self::new(CommandType::Message, name, String::new())
    }

    /// Creates a definition of the given kind.
    #[must_use]
    pub fn new(
        kind: CommandType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            options: Vec::new(),
            guilds: Vec::new(),
        }
    }

    /// Adds an option.
    #[must_use]
    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Scopes the command to the given guilds.
    ///
    /// Repeated guild ids are ignored; first occurrence order is kept.
    #[must_use]
    pub fn with_guilds(mut self, guilds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for raw in guilds {
            let guild = raw.into();
            if !self.guilds.contains(&guild) {
                self.guilds.push(guild);
            }
        }
        self
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the command kind.
    #[must_use]
    pub const fn kind(&self) -> CommandType {
        self.kind
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared options.
    #[must_use]
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// Returns the guild ids the command is scoped to.
    #[must_use]
    pub fn guilds(&self) -> &[String] {
        &self.guilds
    }

    /// Returns `true` when the command is registered globally.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.guilds.is_empty()
    }

    /// Checks the definition against Discord's command constraints.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError`] describing the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), CommandDomainError> {
        let name_length = self.name.chars().count();
        if name_length == 0 {
            return Err(CommandDomainError::EmptyName);
        }
        if name_length > MAX_NAME_LENGTH {
            return Err(CommandDomainError::NameTooLong(self.name.clone()));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(CommandDomainError::DescriptionTooLong(self.name.clone()));
        }

        if self.kind != CommandType::ChatInput {
            return if self.options.is_empty() {
                Ok(())
            } else {
                Err(CommandDomainError::OptionsNotSupported(self.name.clone()))
            };
        }

        if self
            .name
            .chars()
            .any(|ch| ch.is_uppercase() || ch.is_whitespace())
        {
            return Err(CommandDomainError::InvalidChatInputName(self.name.clone()));
        }
        if self.description.is_empty() {
            return Err(CommandDomainError::MissingDescription(self.name.clone()));
        }
        if self.options.len() > MAX_OPTIONS {
            return Err(CommandDomainError::TooManyOptions(self.name.clone()));
        }
        validate_options(&self.name, &self.options)
    }

    /// Builds the payload sent to Discord when registering this command.
    ///
    /// Guild scoping is not part of the payload; it is expressed by the
    /// endpoint the payload is sent to.
    #[must_use]
    pub fn registration_payload(&self) -> CommandRegistrationPayload {
        CommandRegistrationPayload {
            name: self.name.clone(),
            kind: self.kind,
            description: self.description.clone(),
            options: (self.kind == CommandType::ChatInput).then(|| self.options.clone()),
        }
    }
}

/// Command body accepted by Discord's command registration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRegistrationPayload {
    /// Command name.
    pub name: String,
    /// Command kind.
    #[serde(rename = "type")]
    pub kind: CommandType,
    /// Command description.
    pub description: String,
    /// Options, present for chat-input commands only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
}

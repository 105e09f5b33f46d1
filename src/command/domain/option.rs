//! Chat-input command options.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashSet;

use super::{CommandDomainError, ParseDiscriminantError};

const MAX_OPTION_NAME_LENGTH: usize = 32;
const MAX_OPTION_DESCRIPTION_LENGTH: usize = 100;

/// Value type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CommandOptionType {
    /// Nested sub-command.
    SubCommand,
    /// Group of sub-commands.
    SubCommandGroup,
    /// String value.
    String,
    /// Integer value.
    Integer,
    /// Boolean value.
    Boolean,
    /// User reference.
    User,
    /// Channel reference, optionally restricted by channel type.
    Channel,
    /// Role reference.
    Role,
    /// User or role reference.
    Mentionable,
    /// Double-precision number.
    Number,
    /// Uploaded attachment.
    Attachment,
}

impl TryFrom<u8> for CommandOptionType {
    type Error = ParseDiscriminantError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::SubCommand),
            2 => Ok(Self::SubCommandGroup),
            3 => Ok(Self::String),
            4 => Ok(Self::Integer),
            5 => Ok(Self::Boolean),
            6 => Ok(Self::User),
            7 => Ok(Self::Channel),
            8 => Ok(Self::Role),
            9 => Ok(Self::Mentionable),
            10 => Ok(Self::Number),
            11 => Ok(Self::Attachment),
            other => Err(ParseDiscriminantError::new("command option type", other)),
        }
    }
}

impl From<CommandOptionType> for u8 {
    fn from(value: CommandOptionType) -> Self {
        match value {
            CommandOptionType::SubCommand => 1,
            CommandOptionType::SubCommandGroup => 2,
            CommandOptionType::String => 3,
            CommandOptionType::Integer => 4,
            CommandOptionType::Boolean => 5,
            CommandOptionType::User => 6,
            CommandOptionType::Channel => 7,
            CommandOptionType::Role => 8,
            CommandOptionType::Mentionable => 9,
            CommandOptionType::Number => 10,
            CommandOptionType::Attachment => 11,
        }
    }
}

/// Value of a predefined option choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionChoiceValue {
    /// String choice.
    String(String),
    /// Integer or floating-point choice.
    Number(Number),
}

/// A predefined choice offered for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOptionChoice {
    /// Display name of the choice.
    pub name: String,
    /// Value sent back when the choice is picked.
    pub value: OptionChoiceValue,
}

impl CommandOptionChoice {
    /// Creates a string-valued choice.
    #[must_use]
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: OptionChoiceValue::String(value.into()),
        }
    }

    /// Creates an integer-valued choice.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: OptionChoiceValue::Number(Number::from(value)),
        }
    }
}

/// Option declared by a chat-input command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Value type.
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    /// Option name.
    pub name: String,
    /// Option description.
    pub description: String,
    /// Whether the option must be supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Predefined choices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<CommandOptionChoice>,
    /// Nested options for sub-commands and groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    /// Allowed channel types for channel options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<u8>,
    /// Minimum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Number>,
    /// Maximum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Number>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    /// Whether Discord should send autocomplete interactions for this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
}

impl CommandOption {
    /// Creates an option with no constraints.
    #[must_use]
    pub fn new(
        kind: CommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: None,
            choices: Vec::new(),
            options: Vec::new(),
            channel_types: Vec::new(),
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            autocomplete: None,
        }
    }

    /// Marks the option as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Adds a predefined choice.
    #[must_use]
    pub fn with_choice(mut self, choice: CommandOptionChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Adds a nested option.
    #[must_use]
    pub fn with_option(mut self, option: Self) -> Self {
        self.options.push(option);
        self
    }

    /// Enables autocomplete for the option.
    #[must_use]
    pub const fn with_autocomplete(mut self) -> Self {
        self.autocomplete = Some(true);
        self
    }
}

/// Validates a list of sibling options, recursing into nested options.
pub(super) fn validate_options(
    command: &str,
    options: &[CommandOption],
) -> Result<(), CommandDomainError> {
    let mut names = HashSet::new();
    for option in options {
        if !names.insert(option.name.as_str()) {
            return Err(CommandDomainError::DuplicateOption {
                command: command.to_owned(),
                option: option.name.clone(),
            });
        }
        let name_length = option.name.chars().count();
        if name_length == 0 || name_length > MAX_OPTION_NAME_LENGTH {
            return Err(invalid_option(command, option, "name must be 1-32 characters"));
        }
        let description_length = option.description.chars().count();
        if description_length == 0 || description_length > MAX_OPTION_DESCRIPTION_LENGTH {
            return Err(invalid_option(
                command,
                option,
                "description must be 1-100 characters",
            ));
        }
        validate_options(command, &option.options)?;
    }
    Ok(())
}

fn invalid_option(command: &str, option: &CommandOption, reason: &str) -> CommandDomainError {
    CommandDomainError::InvalidOption {
        command: command.to_owned(),
        option: option.name.clone(),
        reason: reason.to_owned(),
    }
}

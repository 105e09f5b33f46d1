//! Command domain model.

mod command;
mod definition;
mod error;
mod option;

pub use command::{Command, CommandCapability};
pub use definition::{CommandDefinition, CommandRegistrationPayload, CommandType};
pub use error::{CommandDomainError, ParseDiscriminantError};
pub use option::{CommandOption, CommandOptionChoice, CommandOptionType, OptionChoiceValue};

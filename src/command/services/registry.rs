//! Immutable command registry used for dispatch and registration.
//!
//! Provides [`CommandRegistry`], a name-keyed snapshot of the commands an
//! application serves. It is populated before the router starts and only
//! read afterwards, so concurrent requests share it without locking.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::command::domain::{Command, CommandDomainError};

/// Errors returned by registry construction and lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandRegistryError {
    /// No registered command has the requested name.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// Two commands share a name.
    #[error("duplicate command name: {0}")]
    DuplicateCommand(String),

    /// A command definition violates Discord's constraints.
    #[error(transparent)]
    InvalidDefinition(#[from] CommandDomainError),
}

/// Result type for registry operations.
pub type CommandRegistryResult<T> = Result<T, CommandRegistryError>;

/// Name-unique collection of commands.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding `commands`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::InvalidDefinition`] when a definition
    /// is invalid, or [`CommandRegistryError::DuplicateCommand`] when two
    /// commands share a name.
    pub fn new(commands: impl IntoIterator<Item = Command>) -> CommandRegistryResult<Self> {
        let mut registry = Self::empty();
        registry.register(commands)?;
        Ok(registry)
    }

    /// Adds commands to the registry.
    ///
    /// Either every command is added or, on error, none is.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::InvalidDefinition`] when a definition
    /// is invalid, or [`CommandRegistryError::DuplicateCommand`] when a name
    /// is already registered or repeats within `commands`.
    pub fn register(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
    ) -> CommandRegistryResult<()> {
        let mut staged: Vec<Command> = Vec::new();
        for command in commands {
            command.definition().validate()?;
            let taken = self
                .commands
                .iter()
                .chain(staged.iter())
                .any(|existing| existing.name() == command.name());
            if taken {
                return Err(CommandRegistryError::DuplicateCommand(
                    command.name().to_owned(),
                ));
            }
            staged.push(command);
        }
        self.commands.extend(staged);
        Ok(())
    }

    /// Finds a command by exact, case-sensitive name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::CommandNotFound`] when no command has
    /// the name.
    pub fn lookup(&self, name: &str) -> CommandRegistryResult<&Command> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .ok_or_else(|| CommandRegistryError::CommandNotFound(name.to_owned()))
    }

    /// Splits commands by registration scope.
    ///
    /// A command scoped to several guilds appears in each guild's bucket.
    /// Registration order is kept within every bucket.
    #[must_use]
    pub fn partition(&self) -> CommandPartition<'_> {
        let mut partition = CommandPartition::default();
        for command in &self.commands {
            let guilds = command.definition().guilds();
            if guilds.is_empty() {
                partition.global.push(command);
                continue;
            }
            for guild in guilds {
                partition
                    .by_guild
                    .entry(guild.as_str())
                    .or_default()
                    .push(command);
            }
        }
        partition
    }

    /// Iterates over commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Returns the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no command is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Commands grouped by registration scope.
#[derive(Debug, Default)]
pub struct CommandPartition<'a> {
    /// Commands registered for every guild.
    pub global: Vec<&'a Command>,
    /// Guild-scoped commands keyed by guild id.
    pub by_guild: BTreeMap<&'a str, Vec<&'a Command>>,
}

impl CommandPartition<'_> {
    /// Returns the names of the global commands.
    #[must_use]
    pub fn global_names(&self) -> Vec<&str> {
        self.global.iter().map(|command| command.name()).collect()
    }

    /// Returns the names of the commands scoped to `guild_id`.
    #[must_use]
    pub fn guild_names(&self, guild_id: &str) -> Vec<&str> {
        self.by_guild
            .get(guild_id)
            .map(|commands| commands.iter().map(|command| command.name()).collect())
            .unwrap_or_default()
    }
}

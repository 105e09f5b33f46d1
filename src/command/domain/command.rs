//! A registered command: definition plus handling capability.

use std::fmt;
use std::sync::Arc;

use super::CommandDefinition;
use crate::command::ports::{CommandHandler, DeferredCommandHandler};

/// How a command answers an interaction.
///
/// The capability is fixed when the command is built, so dispatch branches
/// on this tag instead of on the handler's concrete type.
#[derive(Clone)]
pub enum CommandCapability {
    /// Produces the complete response inline.
    Sync(Arc<dyn CommandHandler>),
    /// Acknowledges immediately and edits the response later.
    Deferred(Arc<dyn DeferredCommandHandler>),
}

impl CommandCapability {
    /// Returns `true` for deferred commands.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl fmt::Debug for CommandCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Sync"),
            Self::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// Command descriptor held by the registry.
#[derive(Debug, Clone)]
pub struct Command {
    definition: CommandDefinition,
    capability: CommandCapability,
}

impl Command {
    /// Creates a command answered inline by `handler`.
    #[must_use]
    pub fn sync(definition: CommandDefinition, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            definition,
            capability: CommandCapability::Sync(handler),
        }
    }

    /// Creates a command acknowledged immediately and completed by
    /// `handler` through a follow-up edit.
    #[must_use]
    pub fn deferred(
        definition: CommandDefinition,
        handler: Arc<dyn DeferredCommandHandler>,
    ) -> Self {
        Self {
            definition,
            capability: CommandCapability::Deferred(handler),
        }
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Returns the command definition.
    #[must_use]
    pub const fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    /// Returns the handling capability.
    #[must_use]
    pub const fn capability(&self) -> &CommandCapability {
        &self.capability
    }
}

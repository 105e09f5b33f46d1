//! Deferred work handed from the router to a dispatcher.

use serde::{Deserialize, Serialize};

use super::ApplicationCommandInteraction;

/// The asynchronous half of a deferred command invocation.
///
/// Jobs are self-contained so a queue can carry them out of process; the
/// executor resolves the command by name when the job runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredJob {
    command_name: String,
    interaction: ApplicationCommandInteraction,
}

impl DeferredJob {
    /// Creates a job for the given interaction.
    ///
    /// The command name is taken from the interaction data.
    #[must_use]
    pub fn new(interaction: ApplicationCommandInteraction) -> Self {
        Self {
            command_name: interaction.data.name.clone(),
            interaction,
        }
    }

    /// Returns the name of the command to run.
    #[must_use]
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// Returns the originating interaction.
    #[must_use]
    pub const fn interaction(&self) -> &ApplicationCommandInteraction {
        &self.interaction
    }

    /// Returns the interaction id.
    #[must_use]
    pub fn interaction_id(&self) -> &str {
        &self.interaction.id
    }
}

//! Pushes registry contents to the Discord REST API.
//!
//! Guild-scoped commands are grouped into one bulk overwrite per guild.
//! Global commands are created one call per command, or replaced in a
//! single bulk overwrite when [`GlobalRegistrationMode::BulkOverwrite`] is
//! selected. Every batch runs concurrently and every outcome is collected:
//! one failing batch never hides or aborts the others.

use futures::future::join_all;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::command::domain::{Command, CommandRegistrationPayload};
use crate::command::services::CommandRegistry;
use crate::interaction::ports::{DiscordApiClient, DiscordApiError};

/// How global commands are sent to Discord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlobalRegistrationMode {
    /// One create call per global command.
    #[default]
    PerCommand,
    /// One bulk overwrite replacing every global command.
    BulkOverwrite,
}

/// Destination of a registration batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistrationTarget {
    /// A single global command created on its own.
    GlobalCommand(String),
    /// All global commands in one bulk overwrite.
    GlobalBulk,
    /// All commands of one guild in one bulk overwrite.
    Guild(String),
}

impl fmt::Display for RegistrationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalCommand(name) => write!(f, "global command '{name}'"),
            Self::GlobalBulk => f.write_str("global commands"),
            Self::Guild(guild_id) => write!(f, "guild '{guild_id}'"),
        }
    }
}

/// Outcome of one registration batch.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// Where the batch was sent.
    pub target: RegistrationTarget,
    /// Names of the commands in the batch, in request order.
    pub commands: Vec<String>,
    /// Discord's response body or the failure.
    pub result: Result<Value, DiscordApiError>,
}

impl RegistrationOutcome {
    /// Returns `true` when the batch succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// A failed registration batch.
#[derive(Debug, Clone)]
pub struct RegistrationFailure {
    /// Where the batch was sent.
    pub target: RegistrationTarget,
    /// Why it failed.
    pub error: DiscordApiError,
}

/// Errors returned when a registration report is converted to a result.
#[derive(Debug, Clone, Error)]
pub enum RegistrarError {
    /// At least one batch failed.
    #[error("command registration failed for {}", describe_failures(.0))]
    BatchesFailed(Vec<RegistrationFailure>),
}

fn describe_failures(failures: &[RegistrationFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{} ({})", failure.target, failure.error))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcomes of every batch issued by [`CommandRegistrar::register_all`].
#[derive(Debug, Clone, Default)]
pub struct RegistrationReport {
    outcomes: Vec<RegistrationOutcome>,
}

impl RegistrationReport {
    /// Returns every outcome: global batches first, then guilds by id.
    #[must_use]
    pub fn outcomes(&self) -> &[RegistrationOutcome] {
        &self.outcomes
    }

    /// Returns `true` when every batch succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(RegistrationOutcome::is_success)
    }

    /// Returns the targets of failed batches.
    #[must_use]
    pub fn failed_targets(&self) -> Vec<&RegistrationTarget> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_success())
            .map(|outcome| &outcome.target)
            .collect()
    }

    /// Converts the report into a result.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::BatchesFailed`] listing every failed batch.
    pub fn into_result(self) -> Result<Self, RegistrarError> {
        let failures: Vec<RegistrationFailure> = self
            .outcomes
            .iter()
            .filter_map(|outcome| {
                outcome
                    .result
                    .as_ref()
                    .err()
                    .map(|error| RegistrationFailure {
                        target: outcome.target.clone(),
                        error: error.clone(),
                    })
            })
            .collect();
        if failures.is_empty() {
            Ok(self)
        } else {
            Err(RegistrarError::BatchesFailed(failures))
        }
    }
}

/// Registers commands with Discord for one application.
pub struct CommandRegistrar<A>
where
    A: DiscordApiClient + ?Sized,
{
    api: Arc<A>,
    application_id: String,
    global_mode: GlobalRegistrationMode,
}

impl<A> CommandRegistrar<A>
where
    A: DiscordApiClient + ?Sized,
{
    /// Creates a registrar using per-command global registration.
    #[must_use]
    pub fn new(api: Arc<A>, application_id: impl Into<String>) -> Self {
        Self {
            api,
            application_id: application_id.into(),
            global_mode: GlobalRegistrationMode::default(),
        }
    }

    /// Selects how global commands are registered.
    #[must_use]
    pub const fn with_global_mode(mut self, mode: GlobalRegistrationMode) -> Self {
        self.global_mode = mode;
        self
    }

    /// Returns the application id commands are registered for.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Registers every command in the registry.
    ///
    /// Global and guild batches run concurrently; the report holds the
    /// outcome of each one.
    pub async fn register_all(&self, registry: &CommandRegistry) -> RegistrationReport {
        let (global, guilds) = futures::join!(
            self.register_global_commands(registry),
            self.register_guild_commands(registry),
        );
        let mut outcomes = global;
        outcomes.extend(guilds);
        let report = RegistrationReport { outcomes };
        info!(
            batches = report.outcomes.len(),
            failed = report.failed_targets().len(),
            "command registration finished"
        );
        report
    }

    /// Registers the global commands only.
    pub async fn register_global_commands(
        &self,
        registry: &CommandRegistry,
    ) -> Vec<RegistrationOutcome> {
        let global = registry.partition().global;
        if global.is_empty() {
            return Vec::new();
        }
        match self.global_mode {
            GlobalRegistrationMode::PerCommand => {
                join_all(global.into_iter().map(|command| self.create_global(command))).await
            }
            GlobalRegistrationMode::BulkOverwrite => {
                let (names, payloads) = payloads_of(&global);
                let result = self
                    .api
                    .bulk_overwrite_global_commands(&self.application_id, &payloads)
                    .await;
                vec![record(RegistrationTarget::GlobalBulk, names, result)]
            }
        }
    }

    /// Registers the guild-scoped commands, one bulk overwrite per guild.
    pub async fn register_guild_commands(
        &self,
        registry: &CommandRegistry,
    ) -> Vec<RegistrationOutcome> {
        let partition = registry.partition();
        join_all(
            partition
                .by_guild
                .iter()
                .map(|(guild_id, commands)| self.overwrite_guild(guild_id, commands)),
        )
        .await
    }

    async fn create_global(&self, command: &Command) -> RegistrationOutcome {
        let payload = command.definition().registration_payload();
        let result = self
            .api
            .create_global_command(&self.application_id, &payload)
            .await;
        record(
            RegistrationTarget::GlobalCommand(command.name().to_owned()),
            vec![command.name().to_owned()],
            result,
        )
    }

    async fn overwrite_guild(&self, guild_id: &str, commands: &[&Command]) -> RegistrationOutcome {
        let (names, payloads) = payloads_of(commands);
        let result = self
            .api
            .bulk_overwrite_guild_commands(&self.application_id, guild_id, &payloads)
            .await;
        record(RegistrationTarget::Guild(guild_id.to_owned()), names, result)
    }
}

fn payloads_of(commands: &[&Command]) -> (Vec<String>, Vec<CommandRegistrationPayload>) {
    commands
        .iter()
        .map(|command| {
            (
                command.name().to_owned(),
                command.definition().registration_payload(),
            )
        })
        .unzip()
}

fn record(
    target: RegistrationTarget,
    commands: Vec<String>,
    result: Result<Value, DiscordApiError>,
) -> RegistrationOutcome {
    match &result {
        Ok(_) => info!(%target, commands = commands.len(), "registered commands"),
        Err(error) => warn!(%target, %error, "command registration batch failed"),
    }
    RegistrationOutcome {
        target,
        commands,
        result,
    }
}

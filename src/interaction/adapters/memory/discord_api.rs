//! Recording Discord API client.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Notify;

use crate::command::domain::CommandRegistrationPayload;
use crate::interaction::domain::{InteractionResponse, MessageData};
use crate::interaction::ports::{DiscordApiClient, DiscordApiError, DiscordApiResult};

/// Status returned for injected failures.
pub const INJECTED_FAILURE_STATUS: u16 = 500;

/// Operations of the Discord API port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// `create_global_command`.
    CreateGlobalCommand,
    /// `bulk_overwrite_global_commands`.
    BulkOverwriteGlobalCommands,
    /// `bulk_overwrite_guild_commands`.
    BulkOverwriteGuildCommands,
    /// `edit_original_interaction_response`.
    EditOriginalInteractionResponse,
    /// `get_original_interaction_response`.
    GetOriginalInteractionResponse,
    /// `create_interaction_response`.
    CreateInteractionResponse,
}

/// A call received by [`InMemoryDiscordApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// A global command creation.
    CreateGlobalCommand {
        /// Application id.
        application_id: String,
        /// Submitted command.
        command: CommandRegistrationPayload,
    },
    /// A global bulk overwrite.
    BulkOverwriteGlobalCommands {
        /// Application id.
        application_id: String,
        /// Submitted commands.
        commands: Vec<CommandRegistrationPayload>,
    },
    /// A guild bulk overwrite.
    BulkOverwriteGuildCommands {
        /// Application id.
        application_id: String,
        /// Target guild.
        guild_id: String,
        /// Submitted commands.
        commands: Vec<CommandRegistrationPayload>,
    },
    /// A follow-up edit of the original response.
    EditOriginalInteractionResponse {
        /// Application id.
        application_id: String,
        /// Interaction token.
        interaction_token: String,
        /// New message body.
        body: MessageData,
    },
    /// A fetch of the original response.
    GetOriginalInteractionResponse {
        /// Application id.
        application_id: String,
        /// Interaction token.
        interaction_token: String,
    },
    /// A callback response.
    CreateInteractionResponse {
        /// Interaction id.
        interaction_id: String,
        /// Interaction token.
        interaction_token: String,
        /// Submitted response.
        response: InteractionResponse,
    },
}

impl RecordedCall {
    /// Returns the operation this call invoked.
    #[must_use]
    pub const fn operation(&self) -> ApiOperation {
        match self {
            Self::CreateGlobalCommand { .. } => ApiOperation::CreateGlobalCommand,
            Self::BulkOverwriteGlobalCommands { .. } => ApiOperation::BulkOverwriteGlobalCommands,
            Self::BulkOverwriteGuildCommands { .. } => ApiOperation::BulkOverwriteGuildCommands,
            Self::EditOriginalInteractionResponse { .. } => {
                ApiOperation::EditOriginalInteractionResponse
            }
            Self::GetOriginalInteractionResponse { .. } => {
                ApiOperation::GetOriginalInteractionResponse
            }
            Self::CreateInteractionResponse { .. } => ApiOperation::CreateInteractionResponse,
        }
    }

    /// Number of ids this call consumes; bulk overwrites take one per
    /// command.
    fn id_count(&self) -> u64 {
        match self {
            Self::BulkOverwriteGlobalCommands { commands, .. }
            | Self::BulkOverwriteGuildCommands { commands, .. } => {
                u64::try_from(commands.len()).map_or(u64::MAX, |len| len.max(1))
            }
            _ => 1,
        }
    }
}

/// Thread-safe Discord API client that records calls instead of sending
/// them.
///
/// Edited messages are kept per interaction token and returned by
/// `get_original_interaction_response`. Failures can be injected per guild
/// or per operation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscordApiClient {
    state: Arc<RwLock<InMemoryApiState>>,
    changed: Arc<Notify>,
}

#[derive(Debug, Default)]
struct InMemoryApiState {
    calls: Vec<RecordedCall>,
    originals: HashMap<String, MessageData>,
    failing_guilds: HashSet<String>,
    failing_operations: HashSet<ApiOperation>,
    next_id: u64,
}

impl InMemoryDiscordApiClient {
    /// Creates a client that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes guild bulk overwrites for `guild_id` fail.
    #[must_use]
    pub fn failing_guild(self, guild_id: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.failing_guilds.insert(guild_id.into());
        }
        self
    }

    /// Makes every call of `operation` fail.
    #[must_use]
    pub fn failing_operation(self, operation: ApiOperation) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.failing_operations.insert(operation);
        }
        self
    }

    /// Returns every recorded call in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .read()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    /// Returns the recorded calls of one operation.
    #[must_use]
    pub fn calls_of(&self, operation: ApiOperation) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation() == operation)
            .collect()
    }

    /// Waits until at least `count` calls of `operation` were recorded.
    pub async fn wait_for_calls(&self, operation: ApiOperation, count: usize) {
        loop {
            let notified = self.changed.notified();
            if self.calls_of(operation).len() >= count {
                return;
            }
            notified.await;
        }
    }

    fn read(&self) -> DiscordApiResult<RwLockReadGuard<'_, InMemoryApiState>> {
        self.state
            .read()
            .map_err(|err| DiscordApiError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> DiscordApiResult<RwLockWriteGuard<'_, InMemoryApiState>> {
        self.state
            .write()
            .map_err(|err| DiscordApiError::transport(std::io::Error::other(err.to_string())))
    }

    /// Records `call` and returns the first id of the range it consumed.
    fn record(&self, call: RecordedCall) -> DiscordApiResult<u64> {
        let operation = call.operation();
        let id_count = call.id_count();
        let guild = match &call {
            RecordedCall::BulkOverwriteGuildCommands { guild_id, .. } => Some(guild_id.clone()),
            _ => None,
        };
        let edited = match &call {
            RecordedCall::EditOriginalInteractionResponse {
                interaction_token,
                body,
                ..
            } => Some((interaction_token.clone(), body.clone())),
            _ => None,
        };
        let outcome = {
            let mut state = self.write()?;
            state.calls.push(call);
            let first_id = state.next_id.saturating_add(1);
            state.next_id = state.next_id.saturating_add(id_count);
            let failing = state.failing_operations.contains(&operation)
                || guild
                    .as_ref()
                    .is_some_and(|guild_id| state.failing_guilds.contains(guild_id));
            if failing {
                Err(DiscordApiError::status(
                    INJECTED_FAILURE_STATUS,
                    json!({ "message": format!("injected failure for {operation:?}") })
                        .to_string(),
                ))
            } else {
                if let Some((token, body)) = edited {
                    state.originals.insert(token, body);
                }
                Ok(first_id)
            }
        };
        self.changed.notify_waiters();
        outcome
    }
}

fn registered(
    id: u64,
    application_id: &str,
    command: &CommandRegistrationPayload,
) -> DiscordApiResult<Value> {
    let mut value = serde_json::to_value(command).map_err(DiscordApiError::decode)?;
    if let Value::Object(fields) = &mut value {
        fields.insert("id".to_owned(), Value::String(id.to_string()));
        fields.insert(
            "application_id".to_owned(),
            Value::String(application_id.to_owned()),
        );
    }
    Ok(value)
}

fn registered_all(
    id: u64,
    application_id: &str,
    commands: &[CommandRegistrationPayload],
) -> DiscordApiResult<Value> {
    commands
        .iter()
        .zip(id..)
        .map(|(command, command_id)| registered(command_id, application_id, command))
        .collect::<DiscordApiResult<Vec<_>>>()
        .map(Value::Array)
}

#[async_trait]
impl DiscordApiClient for InMemoryDiscordApiClient {
    async fn create_global_command(
        &self,
        application_id: &str,
        command: &CommandRegistrationPayload,
    ) -> DiscordApiResult<Value> {
        let id = self.record(RecordedCall::CreateGlobalCommand {
            application_id: application_id.to_owned(),
            command: command.clone(),
        })?;
        registered(id, application_id, command)
    }

    async fn bulk_overwrite_global_commands(
        &self,
        application_id: &str,
        commands: &[CommandRegistrationPayload],
    ) -> DiscordApiResult<Value> {
        let id = self.record(RecordedCall::BulkOverwriteGlobalCommands {
            application_id: application_id.to_owned(),
            commands: commands.to_vec(),
        })?;
        registered_all(id, application_id, commands)
    }

    async fn bulk_overwrite_guild_commands(
        &self,
        application_id: &str,
        guild_id: &str,
        commands: &[CommandRegistrationPayload],
    ) -> DiscordApiResult<Value> {
        let id = self.record(RecordedCall::BulkOverwriteGuildCommands {
            application_id: application_id.to_owned(),
            guild_id: guild_id.to_owned(),
            commands: commands.to_vec(),
        })?;
        registered_all(id, application_id, commands)
    }

    async fn edit_original_interaction_response(
        &self,
        application_id: &str,
        interaction_token: &str,
        body: &MessageData,
    ) -> DiscordApiResult<Value> {
        self.record(RecordedCall::EditOriginalInteractionResponse {
            application_id: application_id.to_owned(),
            interaction_token: interaction_token.to_owned(),
            body: body.clone(),
        })?;
        serde_json::to_value(body).map_err(DiscordApiError::decode)
    }

    async fn get_original_interaction_response(
        &self,
        application_id: &str,
        interaction_token: &str,
    ) -> DiscordApiResult<Value> {
        self.record(RecordedCall::GetOriginalInteractionResponse {
            application_id: application_id.to_owned(),
            interaction_token: interaction_token.to_owned(),
        })?;
        let original = self.read()?.originals.get(interaction_token).cloned();
        match original {
            Some(body) => serde_json::to_value(body).map_err(DiscordApiError::decode),
            None => Err(DiscordApiError::status(
                404,
                json!({ "message": "Unknown Message", "code": 10008 }).to_string(),
            )),
        }
    }

    async fn create_interaction_response(
        &self,
        interaction_id: &str,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> DiscordApiResult<()> {
        self.record(RecordedCall::CreateInteractionResponse {
            interaction_id: interaction_id.to_owned(),
            interaction_token: interaction_token.to_owned(),
            response: response.clone(),
        })?;
        Ok(())
    }
}

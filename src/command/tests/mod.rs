//! Unit tests for the command module.


use async_trait::async_trait;
use std::sync::Arc;

use crate::command::domain::{Command, CommandDefinition};
use crate::command::ports::{CommandHandler, DeferredCommandHandler, HandlerResult};
use crate::interaction::domain::{ApplicationCommandInteraction, InteractionResponse, MessageData};

/// Synchronous handler answering with fixed text.
struct Reply(&'static str);

#[async_trait]
impl CommandHandler for Reply {
    async fn handle_interaction(
        &self,
        _interaction: &ApplicationCommandInteraction,
    ) -> HandlerResult<InteractionResponse> {
        Ok(InteractionResponse::message(self.0))
    }
}

/// Deferred handler answering with fixed text.
struct LaterReply(&'static str);

#[async_trait]
impl DeferredCommandHandler for LaterReply {
    async fn handle_interaction_async(
        &self,
        _interaction: &ApplicationCommandInteraction,
    ) -> HandlerResult<MessageData> {
        Ok(MessageData::content(self.0))
    }
}

fn chat_command(name: &str) -> Command {
    Command::sync(
        CommandDefinition::chat_input(name, "test command"),
        Arc::new(Reply("ok")),
    )
}

fn guild_command(name: &str, guilds: &[&str]) -> Command {
    Command::sync(
        CommandDefinition::chat_input(name, "test command").with_guilds(guilds.iter().copied()),
        Arc::new(Reply("ok")),
    )
}

fn deferred_command(name: &str) -> Command {
    Command::deferred(
        CommandDefinition::chat_input(name, "test command"),
        Arc::new(LaterReply("done")),
    )
}

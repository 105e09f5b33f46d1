//! Shared world state for interaction routing BDD scenarios.

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{Value, json};
use std::num::NonZeroU32;
use std::sync::Arc;

use rstest::fixture;
use serverless_discord::command::domain::{Command, CommandDefinition};
use serverless_discord::command::ports::{
    CommandHandler, DeferredCommandHandler, HandlerResult,
};
use serverless_discord::command::services::CommandRegistry;
use serverless_discord::interaction::adapters::dispatch::{DeferredWorker, deferred_queue};
use serverless_discord::interaction::adapters::memory::InMemoryDiscordApiClient;
use serverless_discord::interaction::adapters::webhook::{
    WebhookAdapter, WebhookRequest, WebhookResponse,
};
use serverless_discord::interaction::domain::{
    ApplicationCommandInteraction, InboundHeaders, InteractionResponse, MessageData,
    SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use serverless_discord::interaction::services::{
    AuthVerifier, DeferredExecutor, InteractionRouter,
};

const SECRET_KEY: [u8; 32] = [9; 32];
const TIMESTAMP: &str = "1700000000";

/// Application id used by every scenario payload.
pub const APPLICATION_ID: &str = "app-bdd";
/// Interaction token used by every scenario payload.
pub const INTERACTION_TOKEN: &str = "token-bdd";

/// Synchronous handler replying with fixed text.
struct FixedReply(String);

#[async_trait]
impl CommandHandler for FixedReply {
    async fn handle_interaction(
        &self,
        _interaction: &ApplicationCommandInteraction,
    ) -> HandlerResult<InteractionResponse> {
        Ok(InteractionResponse::message(self.0.clone()))
    }
}

/// Deferred handler replying with fixed text.
struct FixedFollowUp(String);

#[async_trait]
impl DeferredCommandHandler for FixedFollowUp {
    async fn handle_interaction_async(
        &self,
        _interaction: &ApplicationCommandInteraction,
    ) -> HandlerResult<MessageData> {
        Ok(MessageData::content(self.0.clone()))
    }
}

/// Scenario world for interaction routing behaviour tests.
#[derive(Default)]
pub struct RoutingWorld {
    /// Commands registered before the first request.
    pub commands: Vec<Command>,
    /// Recording Discord API client receiving follow-up edits.
    pub api: InMemoryDiscordApiClient,
    /// Adapter built on the first request.
    pub adapter: Option<WebhookAdapter>,
    /// Worker draining deferred jobs.
    pub worker: Option<DeferredWorker>,
    /// Response to the last request.
    pub last_response: Option<WebhookResponse>,
}

impl RoutingWorld {
    /// Adds a synchronous command replying with `reply`.
    pub fn add_command(&mut self, name: &str, reply: String) {
        self.commands.push(Command::sync(
            CommandDefinition::chat_input(name, "replies inline"),
            Arc::new(FixedReply(reply)),
        ));
    }

    /// Adds a deferred command following up with `reply`.
    pub fn add_deferred_command(&mut self, name: &str, reply: String) {
        self.commands.push(Command::deferred(
            CommandDefinition::chat_input(name, "replies later"),
            Arc::new(FixedFollowUp(reply)),
        ));
    }

    /// Returns the adapter, building the router from the registered
    /// commands on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry rejects the commands.
    pub fn adapter(&mut self) -> Result<WebhookAdapter, eyre::Report> {
        if let Some(adapter) = &self.adapter {
            return Ok(adapter.clone());
        }
        let registry = Arc::new(CommandRegistry::new(std::mem::take(&mut self.commands))?);
        let executor = DeferredExecutor::new(Arc::clone(&registry), Arc::new(self.api.clone()));
        let attempts = NonZeroU32::new(1).ok_or_else(|| eyre::eyre!("zero attempts"))?;
        let (dispatcher, worker) = deferred_queue(executor, attempts);
        let router = InteractionRouter::new(registry, AuthVerifier::ed25519(public_key_hex()))
            .with_dispatcher(Arc::new(dispatcher));
        let adapter = WebhookAdapter::new(Arc::new(router));
        self.worker = Some(worker);
        self.adapter = Some(adapter.clone());
        Ok(adapter)
    }

    /// Sends `payload` through the adapter and records the response.
    ///
    /// # Errors
    ///
    /// Returns an error when the router cannot be built.
    pub fn send(&mut self, payload: &Value, signed: bool) -> Result<(), eyre::Report> {
        let adapter = self.adapter()?;
        let body = serde_json::to_vec(payload)?;
        let mut headers = InboundHeaders::new();
        headers.insert("content-type", "application/json");
        if signed {
            headers.insert(SIGNATURE_HEADER, sign(&body));
            headers.insert(TIMESTAMP_HEADER, TIMESTAMP);
        }
        let request = WebhookRequest::new("POST", headers, Some(body));
        self.last_response = Some(run_async(adapter.handle(request)));
        Ok(())
    }

    /// Returns the last response.
    ///
    /// # Errors
    ///
    /// Returns an error when no request was sent.
    pub fn response(&self) -> Result<&WebhookResponse, eyre::Report> {
        self.last_response
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no request was sent in this scenario"))
    }

    /// Parses the last response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when no request was sent or the body is not JSON.
    pub fn response_json(&self) -> Result<Value, eyre::Report> {
        Ok(serde_json::from_str(&self.response()?.body)?)
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RoutingWorld {
    RoutingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&SECRET_KEY)
}

fn public_key_hex() -> String {
    hex::encode(signing_key().verifying_key().to_bytes())
}

fn sign(body: &[u8]) -> String {
    let mut message = TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(signing_key().sign(&message).to_bytes())
}

/// Builds a ping payload.
#[must_use]
pub fn ping_payload() -> Value {
    json!({
        "type": 1,
        "id": "1",
        "application_id": APPLICATION_ID,
        "token": INTERACTION_TOKEN,
        "version": 1
    })
}

/// Builds an invocation payload for the named chat-input command.
#[must_use]
pub fn command_payload(name: &str) -> Value {
    json!({
        "type": 2,
        "id": "500",
        "application_id": APPLICATION_ID,
        "token": INTERACTION_TOKEN,
        "version": 1,
        "channel_id": "c1",
        "user": {"id": "u1", "username": "bob"},
        "data": {"id": "cmd-1", "name": name, "type": 1}
    })
}

/// Builds a button-click payload.
#[must_use]
pub fn component_payload() -> Value {
    json!({
        "type": 3,
        "id": "501",
        "application_id": APPLICATION_ID,
        "token": INTERACTION_TOKEN,
        "version": 1,
        "message": {"id": "m1"},
        "data": {"custom_id": "confirm", "component_type": 2}
    })
}

//! Unit tests for the interaction module.
//!
//! Requests are signed with a fixed Ed25519 key so the real verifier runs
//! in every router test.

mod classify_tests;
mod http_tests;

use ed25519_dalek::{Signer, SigningKey};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::command::domain::Command;
use crate::command::services::CommandRegistry;
use crate::interaction::domain::{InboundHeaders, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::interaction::ports::DeferredDispatcher;
use crate::interaction::services::{AuthVerifier, InteractionRouter};

const SECRET_KEY: [u8; 32] = [7; 32];
const TIMESTAMP: &str = "1700000000";
const APPLICATION_ID: &str = "app-1";
const INTERACTION_TOKEN: &str = "token-1";

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&SECRET_KEY)
}

fn public_key_hex() -> String {
    hex::encode(signing_key().verifying_key().to_bytes())
}

fn sign(timestamp: &str, body: &[u8]) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(signing_key().sign(&message).to_bytes())
}

fn signed_headers(body: &[u8]) -> InboundHeaders {
    [
        (SIGNATURE_HEADER, sign(TIMESTAMP, body)),
        (TIMESTAMP_HEADER, TIMESTAMP.to_owned()),
    ]
    .into_iter()
    .collect()
}

fn body_of(payload: &Value) -> Vec<u8> {
    serde_json::to_vec(payload).expect("payload should serialise")
}

fn ping_payload() -> Value {
    json!({
        "type": 1,
        "id": "1",
        "application_id": "1",
        "token": "t",
        "version": 1
    })
}

fn command_payload(name: &str) -> Value {
    json!({
        "type": 2,
        "id": "100",
        "application_id": APPLICATION_ID,
        "token": INTERACTION_TOKEN,
        "version": 1,
        "guild_id": "g1",
        "channel_id": "c1",
        "member": {
            "user": {"id": "u1", "username": "alice"},
            "roles": []
        },
        "data": {"id": "cmd-1", "name": name, "type": 1}
    })
}

fn component_payload() -> Value {
    json!({
        "type": 3,
        "id": "101",
        "application_id": APPLICATION_ID,
        "token": INTERACTION_TOKEN,
        "version": 1,
        "message": {"id": "m1"},
        "data": {"custom_id": "confirm", "component_type": 2}
    })
}

fn autocomplete_payload() -> Value {
    json!({
        "type": 4,
        "id": "102",
        "application_id": APPLICATION_ID,
        "token": INTERACTION_TOKEN,
        "version": 1,
        "data": {
            "id": "cmd-1",
            "name": "search",
            "type": 1,
            "options": [{"name": "query", "type": 3, "value": "ru", "focused": true}]
        }
    })
}

fn modal_payload() -> Value {
    json!({
        "type": 5,
        "id": "103",
        "application_id": APPLICATION_ID,
        "token": INTERACTION_TOKEN,
        "version": 1,
        "data": {"custom_id": "feedback", "components": []}
    })
}

fn router(
    commands: Vec<Command>,
    dispatcher: Option<Arc<dyn DeferredDispatcher>>,
) -> InteractionRouter {
    let registry = Arc::new(CommandRegistry::new(commands).expect("registry should build"));
    let router = InteractionRouter::new(registry, AuthVerifier::ed25519(public_key_hex()));
    match dispatcher {
        Some(dispatcher) => router.with_dispatcher(dispatcher),
        None => router,
    }
}

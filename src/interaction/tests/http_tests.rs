//! Tests for `HttpDiscordApiClient` against a local stand-in for Discord.
//!
//! Every test binds an `axum` server to an ephemeral loopback port that
//! records each request and answers with a fixed status and body.

use axum::Router;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use reqwest::Client;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use super::{APPLICATION_ID, INTERACTION_TOKEN};
use crate::command::domain::{CommandDefinition, CommandRegistrationPayload};
use crate::interaction::adapters::http::HttpDiscordApiClient;
use crate::interaction::domain::{InteractionResponse, MessageData};
use crate::interaction::ports::{DiscordApiClient, DiscordApiError, DiscordApiResult};

const BOT_TOKEN: &str = "bot-token";

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    path: String,
    authorization: Option<String>,
    body: String,
}

struct StubDiscord {
    status: StatusCode,
    reply: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubDiscord {
    async fn only_request(&self) -> RecordedRequest {
        let requests = self.requests.lock().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.first().cloned().expect("one request was recorded")
    }
}

async fn record(
    State(stub): State<Arc<StubDiscord>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    stub.requests.lock().await.push(RecordedRequest {
        method,
        path: uri.path().to_owned(),
        authorization,
        body,
    });
    (stub.status, stub.reply.clone())
}

async fn serve(status: StatusCode, reply: &str) -> (HttpDiscordApiClient, Arc<StubDiscord>) {
    let stub = Arc::new(StubDiscord {
        status,
        reply: reply.to_owned(),
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .fallback(record)
        .with_state(Arc::clone(&stub));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move { axum::serve(listener, app).await });

    let http = Client::builder()
        .no_proxy()
        .build()
        .expect("reqwest client");
    let client = HttpDiscordApiClient::with_client(http, format!("http://{addr}/"), BOT_TOKEN);
    (client, stub)
}

fn hello_payload() -> CommandRegistrationPayload {
    CommandDefinition::chat_input("hello", "greets").registration_payload()
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    CreateGlobal,
    BulkGlobal,
    BulkGuild,
    EditOriginal,
    GetOriginal,
}

async fn call(client: &HttpDiscordApiClient, endpoint: Endpoint) -> DiscordApiResult<Value> {
    match endpoint {
        Endpoint::CreateGlobal => {
            client
                .create_global_command(APPLICATION_ID, &hello_payload())
                .await
        }
        Endpoint::BulkGlobal => {
            client
                .bulk_overwrite_global_commands(APPLICATION_ID, &[hello_payload()])
                .await
        }
        Endpoint::BulkGuild => {
            client
                .bulk_overwrite_guild_commands(APPLICATION_ID, "guild-9", &[hello_payload()])
                .await
        }
        Endpoint::EditOriginal => {
            client
                .edit_original_interaction_response(
                    APPLICATION_ID,
                    INTERACTION_TOKEN,
                    &MessageData::content("done"),
                )
                .await
        }
        Endpoint::GetOriginal => {
            client
                .get_original_interaction_response(APPLICATION_ID, INTERACTION_TOKEN)
                .await
        }
    }
}

// ── Requests ───────────────────────────────────────────────────────

#[rstest]
#[case::create_global(Endpoint::CreateGlobal, Method::POST, "/applications/app-1/commands")]
#[case::bulk_global(Endpoint::BulkGlobal, Method::PUT, "/applications/app-1/commands")]
#[case::bulk_guild(
    Endpoint::BulkGuild,
    Method::PUT,
    "/applications/app-1/guilds/guild-9/commands"
)]
#[case::edit_original(
    Endpoint::EditOriginal,
    Method::PATCH,
    "/webhooks/app-1/token-1/messages/@original"
)]
#[case::get_original(
    Endpoint::GetOriginal,
    Method::GET,
    "/webhooks/app-1/token-1/messages/@original"
)]
#[tokio::test]
async fn endpoints_use_discord_routes_with_bot_authorization(
    #[case] endpoint: Endpoint,
    #[case] method: Method,
    #[case] path: &str,
) {
    let (client, stub) = serve(StatusCode::OK, r#"{"id": "42"}"#).await;

    let reply = call(&client, endpoint).await.expect("call should succeed");

    assert_eq!(reply, json!({"id": "42"}));
    let request = stub.only_request().await;
    assert_eq!(request.method, method);
    assert_eq!(request.path, path);
    assert_eq!(request.authorization.as_deref(), Some("Bot bot-token"));
}

#[rstest]
#[tokio::test]
async fn bodies_are_sent_as_json() {
    let (client, stub) = serve(StatusCode::OK, "{}").await;

    call(&client, Endpoint::BulkGuild)
        .await
        .expect("call should succeed");
    call(&client, Endpoint::EditOriginal)
        .await
        .expect("call should succeed");

    let requests = stub.requests.lock().await.clone();
    let bodies: Vec<Value> = requests
        .iter()
        .map(|request| serde_json::from_str(&request.body).expect("json body"))
        .collect();
    assert_eq!(
        bodies.first().and_then(|body| body.pointer("/0/name")),
        Some(&json!("hello"))
    );
    assert_eq!(
        bodies.get(1).and_then(|body| body.get("content")),
        Some(&json!("done"))
    );
}

// ── Responses ──────────────────────────────────────────────────────

#[rstest]
#[case::forbidden(StatusCode::FORBIDDEN, r#"{"message": "Missing Access"}"#)]
#[case::not_found(StatusCode::NOT_FOUND, "unknown webhook")]
#[case::server_error(StatusCode::BAD_GATEWAY, "")]
#[tokio::test]
async fn failure_status_keeps_the_raw_body(#[case] status: StatusCode, #[case] reply: &str) {
    let (client, _stub) = serve(status, reply).await;

    let error = call(&client, Endpoint::GetOriginal)
        .await
        .expect_err("call should fail");

    assert_eq!(error.status_code(), Some(status.as_u16()));
    assert!(matches!(error, DiscordApiError::Status { body, .. } if body == reply));
}

#[rstest]
#[tokio::test]
async fn empty_success_body_is_null() {
    let (client, _stub) = serve(StatusCode::OK, "").await;

    let reply = call(&client, Endpoint::BulkGlobal)
        .await
        .expect("call should succeed");

    assert_eq!(reply, Value::Null);
}

#[rstest]
#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let (client, _stub) = serve(StatusCode::OK, "<html>").await;

    let error = call(&client, Endpoint::CreateGlobal)
        .await
        .expect_err("call should fail");

    assert!(matches!(error, DiscordApiError::Decode(_)));
    assert_eq!(error.status_code(), None);
}

// ── Interaction callback ───────────────────────────────────────────

#[rstest]
#[tokio::test]
async fn callback_accepts_no_content() {
    let (client, stub) = serve(StatusCode::NO_CONTENT, "").await;

    client
        .create_interaction_response(
            "interaction-7",
            INTERACTION_TOKEN,
            &InteractionResponse::pong(),
        )
        .await
        .expect("callback should succeed");

    let request = stub.only_request().await;
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/interactions/interaction-7/token-1/callback");
    assert_eq!(request.authorization.as_deref(), Some("Bot bot-token"));
    let body: Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(body.get("type"), Some(&json!(1)));
}

#[rstest]
#[case::ok(StatusCode::OK)]
#[case::bad_request(StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn callback_rejects_any_other_status(#[case] status: StatusCode) {
    let (client, _stub) = serve(status, "{}").await;

    let error = client
        .create_interaction_response(
            "interaction-7",
            INTERACTION_TOKEN,
            &InteractionResponse::pong(),
        )
        .await
        .expect_err("callback should fail");

    assert_eq!(error.status_code(), Some(status.as_u16()));
}

// ── Construction ───────────────────────────────────────────────────

#[rstest]
#[case::trailing_slash("https://discord.test/api/v10/")]
#[case::bare("https://discord.test/api/v10")]
fn base_url_drops_trailing_slash(#[case] base: &str) {
    let client = HttpDiscordApiClient::new(base, BOT_TOKEN).expect("client");

    assert_eq!(client.base_url(), "https://discord.test/api/v10");
}

#[rstest]
fn debug_output_hides_the_bot_token() {
    let client = HttpDiscordApiClient::new("https://discord.test", BOT_TOKEN).expect("client");

    assert!(!format!("{client:?}").contains(BOT_TOKEN));
}

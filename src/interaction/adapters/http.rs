//! Discord REST API client over `reqwest`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::fmt;

use crate::command::domain::CommandRegistrationPayload;
use crate::interaction::domain::{InteractionResponse, MessageData};
use crate::interaction::ports::{DiscordApiClient, DiscordApiError, DiscordApiResult};

/// Default Discord REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";

const USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_NAME"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Discord REST client authenticated with a bot token.
#[derive(Clone)]
pub struct HttpDiscordApiClient {
    client: Client,
    base_url: String,
    bot_token: String,
}

impl fmt::Debug for HttpDiscordApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDiscordApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpDiscordApiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscordApiError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, bot_token: impl Into<String>) -> DiscordApiResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(DiscordApiError::transport)?;
        Ok(Self::with_client(client, base_url, bot_token))
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            bot_token: bot_token.into(),
        }
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("Bot {}", self.bot_token))
    }

    async fn send(&self, request: RequestBuilder) -> DiscordApiResult<(StatusCode, String)> {
        let response = self
            .authorised(request)
            .send()
            .await
            .map_err(DiscordApiError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(DiscordApiError::transport)?;
        Ok((status, body))
    }

    async fn send_json(&self, request: RequestBuilder) -> DiscordApiResult<Value> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(DiscordApiError::status(status.as_u16(), body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(DiscordApiError::decode)
    }
}

#[async_trait]
impl DiscordApiClient for HttpDiscordApiClient {
    async fn create_global_command(
        &self,
        application_id: &str,
        command: &CommandRegistrationPayload,
    ) -> DiscordApiResult<Value> {
        let url = self.url(&format!("/applications/{application_id}/commands"));
        self.send_json(self.client.post(url).json(command)).await
    }

    async fn bulk_overwrite_global_commands(
        &self,
        application_id: &str,
        commands: &[CommandRegistrationPayload],
    ) -> DiscordApiResult<Value> {
        let url = self.url(&format!("/applications/{application_id}/commands"));
        self.send_json(self.client.put(url).json(commands)).await
    }

    async fn bulk_overwrite_guild_commands(
        &self,
        application_id: &str,
        guild_id: &str,
        commands: &[CommandRegistrationPayload],
    ) -> DiscordApiResult<Value> {
        let url = self.url(&format!(
            "/applications/{application_id}/guilds/{guild_id}/commands"
        ));
        self.send_json(self.client.put(url).json(commands)).await
    }

    async fn edit_original_interaction_response(
        &self,
        application_id: &str,
        interaction_token: &str,
        body: &MessageData,
    ) -> DiscordApiResult<Value> {
        let url = self.url(&format!(
            "/webhooks/{application_id}/{interaction_token}/messages/@original"
        ));
        self.send_json(self.client.patch(url).json(body)).await
    }

    async fn get_original_interaction_response(
        &self,
        application_id: &str,
        interaction_token: &str,
    ) -> DiscordApiResult<Value> {
        let url = self.url(&format!(
            "/webhooks/{application_id}/{interaction_token}/messages/@original"
        ));
        self.send_json(self.client.get(url)).await
    }

    async fn create_interaction_response(
        &self,
        interaction_id: &str,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> DiscordApiResult<()> {
        let url = self.url(&format!(
            "/interactions/{interaction_id}/{interaction_token}/callback"
        ));
        let (status, body) = self.send(self.client.post(url).json(response)).await?;
        if status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(DiscordApiError::status(status.as_u16(), body))
        }
    }
}

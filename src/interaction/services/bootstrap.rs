//! Wiring of routers and registrars from configuration.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::command::domain::Command;
use crate::command::services::{CommandRegistrar, CommandRegistry, CommandRegistryError};
use crate::config::RouterConfig;
use crate::interaction::adapters::dispatch::TokioDispatcher;
use crate::interaction::adapters::http::HttpDiscordApiClient;
use crate::interaction::ports::{DiscordApiClient, DiscordApiError};
use crate::interaction::services::{AuthVerifier, DeferredExecutor, InteractionRouter};

/// Errors returned while wiring a router.
#[derive(Debug, Clone, Error)]
pub enum BootstrapError {
    /// The commands could not be registered.
    #[error(transparent)]
    Registry(#[from] CommandRegistryError),

    /// The HTTP API client could not be built.
    #[error(transparent)]
    ApiClient(#[from] DiscordApiError),
}

/// Builds a router serving `commands` with Ed25519 authentication.
///
/// When `config` carries a bot token, an HTTP API client and a Tokio
/// dispatcher are attached so deferred commands work. Without one, deferred
/// commands fail with a missing-collaborator error when invoked.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the registry rejects the commands or the
/// HTTP client cannot be built.
pub fn init_router(
    config: &RouterConfig,
    commands: impl IntoIterator<Item = Command>,
) -> Result<InteractionRouter, BootstrapError> {
    let registry = Arc::new(CommandRegistry::new(commands)?);
    let auth = AuthVerifier::ed25519(config.public_key.clone());
    let deferred_count = registry
        .iter()
        .filter(|command| command.capability().is_deferred())
        .count();
    let router = InteractionRouter::new(Arc::clone(&registry), auth);

    let Some(bot_token) = config.bot_token.as_deref() else {
        if deferred_count > 0 {
            warn!(
                deferred_count,
                "no bot token configured; deferred commands are disabled"
            );
        }
        info!(commands = registry.len(), "interaction router ready");
        return Ok(router);
    };

    let api: Arc<dyn DiscordApiClient> =
        Arc::new(HttpDiscordApiClient::new(config.api_base_url.clone(), bot_token)?);
    let executor = DeferredExecutor::new(Arc::clone(&registry), api);
    info!(
        commands = registry.len(),
        deferred_count, "interaction router ready with deferred commands"
    );
    Ok(router.with_dispatcher(Arc::new(TokioDispatcher::new(executor))))
}

/// Builds a registrar for the configured application.
#[must_use]
pub fn init_registrar(
    config: &RouterConfig,
    api: Arc<dyn DiscordApiClient>,
) -> CommandRegistrar<dyn DiscordApiClient> {
    CommandRegistrar::new(api, config.application_id.clone())
}

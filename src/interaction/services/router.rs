//! The interaction router: authentication, classification, dispatch.
//!
//! Provides [`InteractionRouter`], which turns one inbound request into
//! exactly one [`InteractionResponse`]. Deferred commands additionally hand
//! one [`DeferredJob`] to the configured dispatcher; the router never waits
//! for that job.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::command::domain::CommandCapability;
use crate::command::services::CommandRegistry;
use crate::interaction::adapters::Ed25519Verifier;
use crate::interaction::domain::{
    ApplicationCommandInteraction, AuthenticationHeaders, ClassifiedInteraction, DeferredJob,
    InboundHeaders, InteractionResponse, InteractionType,
};
use crate::interaction::ports::{DeferredDispatcher, SignatureVerifier};
use crate::interaction::services::{AuthVerifier, InteractionError, InteractionResult};

/// Routes authenticated interactions to registered commands.
pub struct InteractionRouter<V = Ed25519Verifier> {
    registry: Arc<CommandRegistry>,
    auth: AuthVerifier<V>,
    dispatcher: Option<Arc<dyn DeferredDispatcher>>,
}

impl<V> InteractionRouter<V>
where
    V: SignatureVerifier,
{
    /// Creates a router without deferred command support.
    #[must_use]
    pub const fn new(registry: Arc<CommandRegistry>, auth: AuthVerifier<V>) -> Self {
        Self {
            registry,
            auth,
            dispatcher: None,
        }
    }

    /// Enables deferred commands, scheduling their async half on
    /// `dispatcher`.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn DeferredDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Returns the command registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Returns `true` when deferred commands can be dispatched.
    #[must_use]
    pub const fn supports_deferred(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Handles one inbound request.
    ///
    /// Gates run in order and the first failure is returned: signature
    /// headers present, payload classifiable, signature valid. The
    /// interaction is then dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::AuthenticationHeadersMissing`],
    /// [`InteractionError::InvalidInteractionType`] or
    /// [`InteractionError::Unauthorized`] when a gate fails, and any error
    /// of [`Self::dispatch`] afterwards.
    pub async fn handle(
        &self,
        raw_body: &[u8],
        headers: &InboundHeaders,
    ) -> InteractionResult<InteractionResponse> {
        let Some(auth_headers) = AuthenticationHeaders::from_headers(headers) else {
            warn!("rejected request without signature headers");
            return Err(InteractionError::AuthenticationHeadersMissing);
        };

        let interaction = ClassifiedInteraction::from_slice(raw_body);
        let Some(kind) = interaction.kind() else {
            warn!("rejected payload with unrecognised interaction type");
            return Err(InteractionError::InvalidInteractionType);
        };

        if !self.auth.verify(raw_body, &auth_headers) {
            warn!(%kind, "rejected request with invalid signature");
            return Err(InteractionError::Unauthorized);
        }

        debug!(%kind, id = interaction.id(), "dispatching interaction");
        self.dispatch(interaction).await
    }

    /// Dispatches an already authenticated interaction.
    ///
    /// # Errors
    ///
    /// Pings are answered whatever their body holds. Returns
    /// [`InteractionError::CommandNotFound`] for unknown commands,
    /// [`InteractionError::MalformedInteraction`] for command bodies that
    /// cannot be decoded, [`InteractionError::NotImplemented`] for
    /// components, autocomplete and modals,
    /// [`InteractionError::InvalidInteractionType`] for unrecognised
    /// payloads, and handler or dispatch failures of the resolved command.
    pub async fn dispatch(
        &self,
        interaction: ClassifiedInteraction,
    ) -> InteractionResult<InteractionResponse> {
        match interaction {
            ClassifiedInteraction::ApplicationCommand(command) => {
                self.dispatch_command(command).await
            }
            ClassifiedInteraction::Malformed {
                kind: kind @ InteractionType::ApplicationCommand,
                reason,
            } => {
                warn!(%kind, %reason, "application command body could not be decoded");
                Err(InteractionError::MalformedInteraction { kind, reason })
            }
            other => match other.kind() {
                Some(InteractionType::Ping) => Ok(InteractionResponse::pong()),
                Some(kind) => Err(InteractionError::NotImplemented(kind)),
                None => Err(InteractionError::InvalidInteractionType),
            },
        }
    }

    async fn dispatch_command(
        &self,
        interaction: ApplicationCommandInteraction,
    ) -> InteractionResult<InteractionResponse> {
        let name = interaction.data.name.clone();
        let command = self.registry.lookup(&name).map_err(|_| {
            warn!(command = %name, "no registered command matches interaction");
            InteractionError::CommandNotFound(name.clone())
        })?;

        match command.capability() {
            CommandCapability::Sync(handler) => {
                let response = handler
                    .handle_interaction(&interaction)
                    .await
                    .map_err(|source| InteractionError::Handler {
                        command: name.clone(),
                        source,
                    })?;
                info!(
                    command = %name,
                    response_type = ?response.response_type(),
                    "command answered"
                );
                Ok(response)
            }
            CommandCapability::Deferred(handler) => {
                let dispatcher = self
                    .dispatcher
                    .as_ref()
                    .ok_or(InteractionError::MissingCollaborator("deferred dispatcher"))?;
                let placeholder = handler.acknowledge(&interaction).await.map_err(|source| {
                    InteractionError::Handler {
                        command: name.clone(),
                        source,
                    }
                })?;
                let job = DeferredJob::new(interaction);
                let interaction_id = job.interaction_id().to_owned();
                dispatcher
                    .dispatch(job)
                    .map_err(|source| InteractionError::Dispatch {
                        command: name.clone(),
                        source,
                    })?;
                info!(
                    command = %name,
                    interaction_id = %interaction_id,
                    "command acknowledged, deferred work dispatched"
                );
                Ok(InteractionResponse::deferred(placeholder))
            }
        }
    }
}

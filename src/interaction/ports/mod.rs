//! Port contracts for interaction handling.
//!
//! The router depends only on these traits: the signature primitive, the
//! outbound Discord REST client, and the dispatcher that runs the
//! asynchronous half of deferred commands.

pub mod discord_api;
pub mod dispatcher;
pub mod verifier;

pub use discord_api::{DiscordApiClient, DiscordApiError, DiscordApiResult};
pub use dispatcher::{DeferredDispatcher, DispatchError};
pub use verifier::SignatureVerifier;

#[cfg(test)]
pub use dispatcher::MockDeferredDispatcher;
#[cfg(test)]
pub use verifier::MockSignatureVerifier;

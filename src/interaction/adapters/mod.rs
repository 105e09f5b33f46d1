//! Adapter implementations for the interaction ports.
//!
//! # Available Adapters
//!
//! - [`Ed25519Verifier`]: the signature primitive Discord signs with
//! - [`http::HttpDiscordApiClient`]: Discord REST client over `reqwest`
//! - [`memory::InMemoryDiscordApiClient`]: recording client for tests and
//!   local development
//! - [`dispatch`]: detached-task and queue dispatchers for deferred jobs
//! - [`webhook`]: platform gates and the `axum` route

pub mod dispatch;
pub mod ed25519;
pub mod http;
pub mod memory;
pub mod webhook;

pub use ed25519::Ed25519Verifier;

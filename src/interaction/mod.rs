//! Inbound Discord interactions: authentication, classification, routing.
//!
//! A request travels through four hard gates: the signature headers must be
//! present, the payload must classify as a known interaction type, the
//! Ed25519 signature must verify, and only then is the interaction
//! dispatched. Application commands resolve against the
//! [`crate::command::services::CommandRegistry`]; deferred commands are
//! acknowledged inline and completed by a detached job.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

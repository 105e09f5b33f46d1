//! Application commands: definitions, handlers, registry, and registrar.
//!
//! A command pairs a [`domain::CommandDefinition`] (the metadata Discord
//! knows about) with a capability: either a synchronous handler that
//! produces the whole response inline, or a deferred handler that
//! acknowledges immediately and delivers its result later through a
//! follow-up edit.
//!
//! - Domain types in [`domain`]
//! - Handler contracts in [`ports`]
//! - Registry and registrar in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

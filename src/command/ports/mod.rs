//! Port trait definitions for command handlers.
//!
//! Handlers are the application code behind a command. The router calls
//! them through these traits and never inspects their concrete types.

pub mod handler;

pub use handler::{CommandHandler, DeferredCommandHandler, HandlerError, HandlerResult};

#[cfg(test)]
pub use handler::{MockCommandHandler, MockDeferredCommandHandler};

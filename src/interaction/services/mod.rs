//! Application services for interaction handling.

mod auth;
mod bootstrap;
mod deferred;
mod error;
mod router;

pub use auth::{AuthVerifier, verify_signature};
pub use bootstrap::{BootstrapError, init_registrar, init_router};
pub use deferred::{DeferredExecutionError, DeferredExecutor};
pub use error::{InteractionError, InteractionResult};
pub use router::InteractionRouter;

//! Application services for command lookup and registration.

mod registrar;
mod registry;

pub use registrar::{
    CommandRegistrar, GlobalRegistrationMode, RegistrationFailure, RegistrationOutcome,
    RegistrationReport, RegistrationTarget, RegistrarError,
};
pub use registry::{CommandPartition, CommandRegistry, CommandRegistryError, CommandRegistryResult};

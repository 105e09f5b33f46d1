//! In-memory adapter implementations.
//!
//! These adapters record what they are asked to do instead of talking to
//! Discord, for tests and local development.

mod discord_api;

pub use discord_api::{
    ApiOperation, INJECTED_FAILURE_STATUS, InMemoryDiscordApiClient, RecordedCall,
};

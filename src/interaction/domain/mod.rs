//! Interaction domain model.
//!
//! These types describe what Discord sends and what it expects back. They
//! carry no behaviour beyond construction, classification, and
//! (de)serialisation.

mod classify;
mod headers;
mod interaction;
mod job;
mod kind;
mod response;

pub use classify::ClassifiedInteraction;
pub use headers::{AuthenticationHeaders, InboundHeaders, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use interaction::{
    ApplicationCommandData, ApplicationCommandInteraction, AutocompleteData,
    AutocompleteInteraction, GuildMember, Interaction, InteractionDataOption,
    MessageComponentData, MessageComponentInteraction, ModalSubmitData, ModalSubmitInteraction,
    PingInteraction, User,
};
pub use job::DeferredJob;
pub use kind::InteractionType;
pub use response::{
    AutocompleteResultData, DEFERRED_PLACEHOLDER, InteractionResponse, InteractionResponseType,
    InvalidResponseShape, MessageData, ModalData,
};

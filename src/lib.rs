//! Serverless Discord: receive, verify, and route Discord interaction webhooks.
//!
//! This crate turns raw Discord interaction webhooks into responses. It
//! verifies the Ed25519 request signature, classifies the payload by
//! interaction type, resolves application commands against an immutable
//! registry, and manages Discord's two response modes: an immediate reply,
//! or a deferred acknowledgement followed by an edit of the original
//! response once the real work is done.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for collaborators (signature
//!   verification, the Discord REST API, deferred dispatch, handlers)
//! - **Adapters**: Concrete implementations of ports (Ed25519, `reqwest`,
//!   Tokio, in-memory, axum)
//! - **Services**: Orchestration of domain and ports
//!
//! # Modules
//!
//! - [`interaction`]: Interaction classification, authentication, routing
//! - [`command`]: Command definitions, handlers, registry, and registrar
//! - [`config`]: Runtime configuration
//! - [`logging`]: Tracing subscriber setup

pub mod command;
pub mod config;
pub mod interaction;
pub mod logging;

//! Step definitions for interaction routing BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;

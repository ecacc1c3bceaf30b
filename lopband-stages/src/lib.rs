//! # lopband-stages
//!
//! The built-in stage transforms and the name registry that resolves
//! command-line stage names into fresh transform instances. Each resolved
//! stage gets its own instance, so multiple stages of the same kind never
//! share state.

pub mod registry;
pub mod transforms;

pub use registry::{available, create, RegistryError};

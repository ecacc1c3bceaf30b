//! Stage name resolution.
//!
//! Replaces the runtime module loading of the original design: a stage
//! name maps to a constructor that returns a fresh, independently owned
//! transform instance. Unknown names fail with a diagnostic listing what
//! is available, before any item flows.

use lopband_core::Transform;
use thiserror::Error;

use crate::transforms::{Expander, Flipper, Logger, Rotator, Typewriter, Uppercaser};

/// The stage names this build knows, with one-line descriptions.
pub const AVAILABLE: &[(&str, &str)] = &[
    ("logger", "Logs all strings that pass through"),
    ("typewriter", "Simulates typewriter effect with delays"),
    ("uppercaser", "Converts strings to uppercase"),
    (
        "rotator",
        "Moves every character to the right; the last wraps to the front",
    ),
    ("flipper", "Reverses the order of characters"),
    ("expander", "Expands each character with spaces"),
];

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown stage '{name}'; available stages: {names}", name = .0, names = available_names())]
    UnknownStage(String),
}

fn available_names() -> String {
    AVAILABLE
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Names of all known stages, with descriptions, for usage text.
pub fn available() -> &'static [(&'static str, &'static str)] {
    AVAILABLE
}

/// Resolves a stage name into a fresh transform instance.
pub fn create(name: &str) -> Result<Box<dyn Transform>, RegistryError> {
    match name {
        "logger" => Ok(Box::new(Logger)),
        "typewriter" => Ok(Box::new(Typewriter::new())),
        "uppercaser" => Ok(Box::new(Uppercaser)),
        "rotator" => Ok(Box::new(Rotator)),
        "flipper" => Ok(Box::new(Flipper)),
        "expander" => Ok(Box::new(Expander)),
        unknown => Err(RegistryError::UnknownStage(unknown.to_owned())),
    }
}

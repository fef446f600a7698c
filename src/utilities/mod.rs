//! Shared utilities.

pub mod errors;

pub use errors::{ConfigError, GenerationError, PersonaError};

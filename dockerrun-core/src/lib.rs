//! Dockerrun core library — domain types and validation errors.
//!
//! Public API surface:
//! - [`types`] — [`EnvTag`] and the placeholder token
//! - [`error`] — [`ValidationError`]

pub mod error;
pub mod types;

pub use error::ValidationError;
pub use types::{EnvTag, PLACEHOLDER};

//! Error types for dockerrun-core.

use thiserror::Error;

use crate::types::EnvTag;

/// The supplied environment tag is not in the allowed set.
///
/// Matching is exact: empty strings, whitespace variants, and case
/// differences are all rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid environment tag '{value}'; accepted values: {}", EnvTag::allowed_list())]
pub struct ValidationError {
    /// The rejected input, verbatim.
    pub value: String,
}

impl ValidationError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

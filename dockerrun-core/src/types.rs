//! Domain types for dockerrun.
//!
//! An [`EnvTag`] selects which image variant a rendered manifest references.
//! Parsing is exact-match by design: deployment channels are a closed set,
//! and anything that is not literally `latest` or `master` — including case
//! variants and padded input — must fail validation rather than be coerced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Placeholder token replaced during rendering.
///
/// Templates mark insertion points with this literal substring; only exact
/// occurrences are substituted.
pub const PLACEHOLDER: &str = "${ENV}";

/// Enumerated build-channel identifier for a deployment manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvTag {
    /// Development channel — images pushed from the main development branch.
    Latest,
    /// Production channel — images pushed from the release branch.
    Master,
}

impl EnvTag {
    /// All allowed tags in a stable order.
    pub fn all() -> &'static [EnvTag] {
        &[EnvTag::Latest, EnvTag::Master]
    }

    /// The literal string form used in image references.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvTag::Latest => "latest",
            EnvTag::Master => "master",
        }
    }

    /// Comma-separated allowed values, for error messages and prompts.
    pub fn allowed_list() -> String {
        EnvTag::all()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for EnvTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvTag {
    type Err = ValidationError;

    // Exact match only — no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(EnvTag::Latest),
            "master" => Ok(EnvTag::Master),
            other => Err(ValidationError::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn allowed_tags_parse() {
        assert_eq!("latest".parse::<EnvTag>().unwrap(), EnvTag::Latest);
        assert_eq!("master".parse::<EnvTag>().unwrap(), EnvTag::Master);
    }

    #[rstest]
    #[case("staging")]
    #[case("")]
    #[case(" latest")]
    #[case("latest ")]
    #[case("Latest")]
    #[case("MASTER")]
    #[case("latest\n")]
    fn disallowed_tags_fail(#[case] input: &str) {
        let err = input.parse::<EnvTag>().expect_err("must be rejected");
        assert_eq!(err.value, input);
    }

    #[test]
    fn display_matches_literal_form() {
        assert_eq!(EnvTag::Latest.to_string(), "latest");
        assert_eq!(EnvTag::Master.to_string(), "master");
    }

    #[test]
    fn allowed_list_names_both_channels() {
        assert_eq!(EnvTag::allowed_list(), "latest, master");
    }

    #[test]
    fn serde_roundtrip_uses_lowercase() {
        let json = serde_json::to_string(&EnvTag::Master).unwrap();
        assert_eq!(json, "\"master\"");
        let back: EnvTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EnvTag::Master);
    }
}

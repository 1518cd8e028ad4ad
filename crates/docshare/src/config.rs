//! Reconciler configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the [`Reconciler`](crate::Reconciler).
///
/// The success status, the order-id separator and the granted role are
/// fixed; the product description is the only tunable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct ReconcilerConfig {
    expected_description: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    expected_description: String,
}

impl TryFrom<RawConfig> for ReconcilerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.expected_description)
    }
}

impl ReconcilerConfig {
    /// Create a config for the product sold under `expected_description`.
    ///
    /// The description is matched exactly, so it is stored as given.
    pub fn new(expected_description: impl Into<String>) -> Result<Self, ConfigError> {
        let expected_description = expected_description.into();
        if expected_description.is_empty() {
            return Err(ConfigError::EmptyDescription);
        }
        Ok(Self {
            expected_description,
        })
    }

    /// Load from JSON, e.g. `{"expected_description": "..."}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn expected_description(&self) -> &str {
        &self.expected_description
    }
}

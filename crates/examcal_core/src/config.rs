//! Session configuration.
//!
//! # Invariants
//! - Every field has a default matching the shipped app behaviour, so an
//!   empty JSON object (or no config at all) is valid.

use crate::controller::ReminderOptions;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Settings applied when an exam session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub reminder: ReminderOptions,
    /// Seed for reproducible marker placement; `None` draws from OS entropy.
    pub location_seed: Option<u64>,
}

impl SessionConfig {
    /// Parses a JSON config document; blank input yields the defaults.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        if document.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(document).map_err(ConfigError::Json)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid session config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

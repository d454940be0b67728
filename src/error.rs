//! Level loading errors
//!
//! Every failure happens at load time and names the level it came from.
//! Nothing inside a frame can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The level sequence is empty
    #[error("no levels configured")]
    NoLevels,

    /// The level file could not be read
    #[error("level {level}: cannot read file: {source}")]
    Io {
        level: String,
        source: std::io::Error,
    },

    /// Missing field, wrong type, or unknown kind tag
    #[error("level {level}: malformed level data: {source}")]
    Malformed {
        level: String,
        source: serde_json::Error,
    },

    /// Field present but its value cannot produce a playable level
    #[error("level {level}: invalid {field}: {reason}")]
    Invalid {
        level: String,
        field: &'static str,
        reason: String,
    },
}

impl LoadError {
    pub(crate) fn invalid(level: &str, field: &'static str, reason: impl Into<String>) -> Self {
        LoadError::Invalid {
            level: level.to_string(),
            field,
            reason: reason.into(),
        }
    }

    /// Identifier of the level that failed, if any
    pub fn level(&self) -> Option<&str> {
        match self {
            LoadError::NoLevels => None,
            LoadError::Io { level, .. }
            | LoadError::Malformed { level, .. }
            | LoadError::Invalid { level, .. } => Some(level),
        }
    }
}

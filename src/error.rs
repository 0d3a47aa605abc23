//! Error types
//!
//! None of these cross the simulation boundary: asset failures degrade to
//! fallback art, and invalid gameplay requests are ignored rather than
//! reported.

use thiserror::Error;

/// Failure to load a single asset. Non-fatal; the role falls back to a flat color.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset `{key}` not found at `{path}`")]
    NotFound { key: String, path: String },

    #[error("asset `{key}` at `{path}` is empty or not a file")]
    Empty { key: String, path: String },

    #[error("asset `{key}` could not be decoded: {reason}")]
    Decode { key: String, reason: String },

    #[error("asset `{key}` could not be read")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    /// Logical key of the asset that failed
    pub fn key(&self) -> &str {
        match self {
            AssetError::NotFound { key, .. }
            | AssetError::Empty { key, .. }
            | AssetError::Decode { key, .. }
            | AssetError::Io { key, .. } => key,
        }
    }
}

/// Skin selection errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkinError {
    #[error("unknown skin `{0}`")]
    UnknownSkin(String),

    #[error("skins cannot be changed during a run")]
    SelectionDuringRun,

    #[error("skin catalog is empty")]
    EmptyCatalog,

    #[error("invalid skin catalog: {0}")]
    Parse(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

//! Crate error types

use thiserror::Error;

/// Failure to load or validate [`crate::Settings`]
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level error for fallible simulation setup
#[derive(Error, Debug)]
pub enum Error {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to spawn animation thread: {0}")]
    Spawn(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

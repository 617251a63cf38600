//! Error types for the humanizer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HumanizerError {
    #[error("Invalid parameter {name}: {value} (expected 0-100)")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("Humanizer not initialized")]
    NotInitialized,
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HumanizerError>;

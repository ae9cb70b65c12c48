//! Error types
//!
//! `Display` on [`SubmitError`] is the text shown next to the input field;
//! underlying causes stay reachable through `source()` for logging.

use thiserror::Error;

/// Glyph renderer failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("font `{0}` is not loaded")]
    UnknownFont(String),

    #[error("character {0:?} is not supported by the font")]
    UnsupportedCharacter(char),

    #[error("failed to load font `{name}`: {reason}")]
    FontLoad { name: String, reason: String },
}

/// Reasons a submit is refused or fails
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please enter some text")]
    EmptyInput,

    #[error("Text must be {max} characters or less")]
    TooLong { max: usize, len: usize },

    #[error("Fonts are still loading, try again in a moment")]
    NotReady,

    #[error("Invalid render options: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Failed to generate ASCII art")]
    Rendering(#[source] RenderError),
}

/// Settings loading and validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Save-as failures
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No ASCII art to save")]
    NothingToSave,

    #[error("Failed to save: {0}")]
    Io(#[from] std::io::Error),
}

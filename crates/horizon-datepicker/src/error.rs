//! Error types for loading date picker configuration.

use std::path::PathBuf;

use crate::dates::ParseError;

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning host attributes into a picker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The attribute document is not valid TOML, or has wrongly typed keys.
    #[error("Invalid attribute document: {0}")]
    Toml(#[from] toml::de::Error),

    /// Attribute file could not be read.
    #[error("Failed to read attributes '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A date-valued attribute did not parse.
    #[error("Invalid date in '{attribute}': {source}")]
    InvalidDate {
        attribute: &'static str,
        #[source]
        source: ParseError,
    },

    /// An attribute value is outside what the picker accepts.
    #[error("Invalid value for attribute '{attribute}': {message}")]
    Attribute {
        attribute: &'static str,
        message: String,
    },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a date attribute error.
    pub fn invalid_date(attribute: &'static str, source: ParseError) -> Self {
        Self::InvalidDate { attribute, source }
    }

    /// Create an attribute value error.
    pub fn attribute(attribute: &'static str, message: impl Into<String>) -> Self {
        Self::Attribute {
            attribute,
            message: message.into(),
        }
    }
}

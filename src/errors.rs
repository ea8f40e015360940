//! Custom error types for dataset preparation

use std::fmt;
use std::io;

/// Errors raised while preparing a CODEX dataset
#[derive(Debug)]
pub enum PrepError {
    /// I/O error
    IoError(io::Error),
    /// Malformed JSON document
    JsonError(serde_json::Error),
    /// YAML serialization failure
    YamlError(serde_yaml::Error),
    /// Malformed TOML defaults file
    TomlError(toml::de::Error),
    /// Image decoding failure
    ImageError(image::ImageError),
    /// None of the accepted names for a field were present
    MissingField(Vec<String>),
    /// A field was present but its value was unusable
    InvalidValue { field: String, message: String },
    /// Channel inference could not pick a single channel
    ChannelInference(String),
    /// Raw data staging failure
    StagingError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepError::IoError(e) => write!(f, "I/O error: {}", e),
            PrepError::JsonError(e) => write!(f, "JSON error: {}", e),
            PrepError::YamlError(e) => write!(f, "YAML error: {}", e),
            PrepError::TomlError(e) => write!(f, "TOML error: {}", e),
            PrepError::ImageError(e) => write!(f, "Image error: {}", e),
            PrepError::MissingField(names) => {
                write!(f, "No match found for field name(s): {}", names.join(", "))
            }
            PrepError::InvalidValue { field, message } => {
                write!(f, "Invalid value for {}: {}", field, message)
            }
            PrepError::ChannelInference(msg) => write!(f, "Channel inference failed: {}", msg),
            PrepError::StagingError(msg) => write!(f, "Staging error: {}", msg),
            PrepError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrepError::IoError(e) => Some(e),
            PrepError::JsonError(e) => Some(e),
            PrepError::YamlError(e) => Some(e),
            PrepError::TomlError(e) => Some(e),
            PrepError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PrepError {
    fn from(error: io::Error) -> Self {
        PrepError::IoError(error)
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(error: serde_json::Error) -> Self {
        PrepError::JsonError(error)
    }
}

impl From<serde_yaml::Error> for PrepError {
    fn from(error: serde_yaml::Error) -> Self {
        PrepError::YamlError(error)
    }
}

impl From<toml::de::Error> for PrepError {
    fn from(error: toml::de::Error) -> Self {
        PrepError::TomlError(error)
    }
}

impl From<image::ImageError> for PrepError {
    fn from(error: image::ImageError) -> Self {
        PrepError::ImageError(error)
    }
}

impl From<String> for PrepError {
    fn from(msg: String) -> Self {
        PrepError::GenericError(msg)
    }
}

impl PrepError {
    /// Shorthand for an `InvalidValue` error
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        PrepError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for preparation operations
pub type PrepResult<T> = Result<T, PrepError>;

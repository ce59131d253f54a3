//! Error types for Pyre

use thiserror::Error;

/// The main error type for Pyre operations
#[derive(Debug, Error)]
pub enum PyreError {
    #[error("Setting not found: {0}")]
    KeyNotFound(String),

    #[error("Setting '{key}' type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        key: String,
        expected: String,
        got: String,
    },

    #[error("Value out of range: {key} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        key: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid enum value for {key}: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        key: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Schema load error: {0}")]
    SchemaLoad(String),

    #[error("Duplicate setting key: {0}")]
    DuplicateKey(String),

    #[error("Widget not found: {0}")]
    WidgetNotFound(String),

    #[error("Widget '{id}' has kind {got}, expected {expected}")]
    WidgetTypeMismatch {
        id: String,
        expected: String,
        got: String,
    },

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Template parse error: {0}")]
    TemplateParse(String),

    #[error("Action not found: {0}")]
    ActionNotFound(String),

    #[error("Invalid color '{input}': {reason}")]
    ColorParse { input: String, reason: String },

    #[error("Invalid version '{0}'")]
    VersionParse(String),

    #[error("Effect not found: {0}")]
    EffectNotFound(String),

    #[error("Effect already registered: {0}")]
    DuplicateNick(String),

    #[error("Invalid effect nick '{0}': must be lowercase hyphen-separated tokens")]
    InvalidNick(String),

    #[error("Uniform '{uniform}' not found in shader program for '{effect}'")]
    UniformNotFound { effect: String, uniform: String },

    #[error("Animation already started for shader '{0}'")]
    ShaderAlreadyBegun(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

impl PyreError {
    /// Shorthand for a color decoding failure
    pub fn color(input: &str, reason: impl Into<String>) -> Self {
        PyreError::ColorParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Pyre operations
pub type Result<T> = std::result::Result<T, PyreError>;

impl From<toml::de::Error> for PyreError {
    fn from(err: toml::de::Error) -> Self {
        PyreError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PyreError {
    fn from(err: toml::ser::Error) -> Self {
        PyreError::TomlSerError(err.to_string())
    }
}

//! Errors returned when an APM attribute cannot be written.
use thiserror::Error;

/// Describe the result of writing an APM attribute.
pub type AttributeResult<T> = Result<T, AttributeError>;

/// Errors returned by the attribute writer functions.
///
/// Every variant carries the attribute key as the caller passed it (for key
/// errors) or in its normalized form (for everything after key validation).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttributeError {
    /// The key is empty, contains whitespace, or contains characters other
    /// than ASCII letters, digits and dots.
    #[error("invalid attribute key '{key}': {reason}")]
    InvalidKey {
        /// The trimmed key that failed validation.
        key: String,
        /// Why the key was rejected.
        reason: &'static str,
    },

    /// The scalar value is null, or a float that is NaN or infinite.
    #[error("invalid attribute value for key '{key}': {reason}")]
    InvalidValue {
        /// The normalized attribute key.
        key: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The value is not a bool, integer, float or string.
    #[error("unsupported value type '{type_name}' for key '{key}', supported types: bool, i64, f64, string")]
    UnsupportedType {
        /// The normalized attribute key.
        key: String,
        /// Name of the rejected value kind.
        type_name: &'static str,
    },

    /// The list had no elements.
    #[error("list cannot be empty for key: {0}")]
    InvalidList(String),

    /// Every list element was dropped as null or non-finite.
    #[error("list contains only null or invalid values for key: {0}")]
    EmptyAfterFilter(String),

    /// The context carries no span to write to.
    #[error("no active span available in current context for key: {0}")]
    NoActiveSpan(String),
}

impl AttributeError {
    /// The attribute key this error refers to.
    pub fn key(&self) -> &str {
        match self {
            AttributeError::InvalidKey { key, .. }
            | AttributeError::InvalidValue { key, .. }
            | AttributeError::UnsupportedType { key, .. } => key,
            AttributeError::InvalidList(key)
            | AttributeError::EmptyAfterFilter(key)
            | AttributeError::NoActiveSpan(key) => key,
        }
    }
}

/// Convenience result type used across chartwise.
pub type ChartwiseResult<T> = Result<T, ChartwiseError>;

/// Error taxonomy for the fallible boundaries of the crate.
///
/// Normalization and scale resolution never fail; these errors only surface while loading a
/// configuration or serializing results.
#[derive(thiserror::Error, Debug)]
pub enum ChartwiseError {
    /// Malformed or unreadable chart configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing normalized output.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChartwiseError {
    /// Build a [`ChartwiseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChartwiseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result type used across textclip.
pub type TextclipResult<T> = Result<T, TextclipError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum TextclipError {
    /// Malformed user-provided argument strings (colors, gradients, sizes).
    #[error("format error: {0}")]
    Format(String),

    /// Parameters that parse but cannot be rendered (zero sizes, odd dimensions, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or undecodable bundled assets.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failures while driving the external encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TextclipError {
    /// Build a [`TextclipError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`TextclipError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TextclipError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`TextclipError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result type used across lumasync.
pub type LumaResult<T> = Result<T, LumaError>;

/// Top-level error taxonomy used by fallible APIs.
///
/// The per-frame entry points ([`crate::ClockDriver`], [`crate::CrossfadeMixer`]) never return
/// these; they log and degrade to boolean outcomes instead.
#[derive(thiserror::Error, Debug)]
pub enum LumaError {
    /// Invalid user-provided data (presets, requests, table dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building, converting or blending LUT tables.
    #[error("lut error: {0}")]
    Lut(String),

    /// A video backend rejected or failed a command.
    #[error("backend error: {0}")]
    Backend(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LumaError {
    /// Build a [`LumaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LumaError::Lut`] value.
    pub fn lut(msg: impl Into<String>) -> Self {
        Self::Lut(msg.into())
    }

    /// Build a [`LumaError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`LumaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

use thiserror::Error;

/// Error types for encoding, composing and rendering atlases
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Invalid period {period}: period must be a positive integer")]
    InvalidPeriod { period: i64 },

    #[error("Length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot animate an empty atlas")]
    EmptyAtlas,

    #[error("Field '{0}' was supplied more than once")]
    DuplicateField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Encoder error: {0}")]
    Encoder(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AtlasError {
    pub(crate) fn length_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    pub(crate) fn encoder(err: impl std::fmt::Display) -> Self {
        Self::Encoder(err.to_string())
    }
}

/// Result type alias for atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

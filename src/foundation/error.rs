/// Crate-wide result alias.
pub type GifResult<T> = Result<T, GifError>;

/// Errors produced while capturing, differencing or finalizing an animation.
#[derive(thiserror::Error, Debug)]
pub enum GifError {
    /// Invalid input or configuration (empty layer lists, zero-area crops, mismatched sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// A rectangle or index fell outside the buffer it addresses.
    #[error("range error: {0}")]
    Range(String),

    /// An operation was called in the wrong session state.
    #[error("state error: {0}")]
    State(String),

    /// Palette construction or index mapping failed.
    #[error("quantizer error: {0}")]
    Quantize(String),

    /// The container encoder rejected the frames.
    #[error("encoder error: {0}")]
    Encode(String),

    /// Configuration could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Collaborator failure carrying its own error chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GifError {
    /// Build a [`GifError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GifError::Range`].
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`GifError::State`].
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`GifError::Quantize`].
    pub fn quantize(msg: impl Into<String>) -> Self {
        Self::Quantize(msg.into())
    }

    /// Build a [`GifError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`GifError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

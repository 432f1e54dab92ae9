use thiserror::Error;

/// Errors that can occur while embedding or detecting a watermark.
///
/// A missing watermark is not an error: detection reports it as
/// [`Detection::NotFound`](crate::Detection::NotFound).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    /// The bitstream needs more samples than the working channel holds.
    #[error("audio is too short to hold the message: need {required} samples, have {available}")]
    Capacity { required: usize, available: usize },

    /// The payload contains a character the 8-bit codec cannot carry.
    #[error("unsupported character {character:?} (U+{code:04X}) at position {position}")]
    Alphabet {
        character: char,
        code: u32,
        position: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl WatermarkError {
    pub(crate) fn alphabet(character: char, position: usize) -> Self {
        Self::Alphabet {
            character,
            code: character as u32,
            position,
        }
    }
}

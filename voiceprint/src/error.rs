use thiserror::Error;

/// Errors returned by voiceprint operations.
#[derive(Debug, Error)]
pub enum VoiceprintError {
    #[error("empty sample buffer")]
    EmptyAudio,

    #[error("invalid sample rate: {got}")]
    InvalidSampleRate { got: u32 },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("voiceprint store lock poisoned")]
    StorePoisoned,
}

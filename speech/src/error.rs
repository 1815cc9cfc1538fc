use thiserror::Error;

/// Hard failures from transcription collaborators. Soft, user-facing
/// outcomes are [`Transcript`](crate::Transcript) variants instead.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("empty audio input")]
    EmptyAudio,

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("no transcriber configured")]
    NoTranscriber,

    #[error("transcription backend error: {0}")]
    Backend(String),
}

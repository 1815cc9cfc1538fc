use std::fmt;

/// Outcome of a transcription attempt.
///
/// The non-text variants are soft failures shown to the user as plain
/// sentences; they are ordinary results, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    /// Recognized text.
    Text(String),
    /// The audio contained no recognizable speech.
    NoSpeech,
    /// The recognition backend could not be reached.
    ServiceUnavailable,
    /// The backend answered but recognition failed.
    RecognitionFailed,
}

impl Transcript {
    /// Recognized text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// True for [`Transcript::Text`].
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => f.write_str(t),
            Self::NoSpeech => f.write_str("no speech detected"),
            Self::ServiceUnavailable => f.write_str("speech service unavailable"),
            Self::RecognitionFailed => f.write_str("speech recognition failed"),
        }
    }
}

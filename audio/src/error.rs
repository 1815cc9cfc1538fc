use thiserror::Error;

/// Errors returned by audio probing and decoding.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio buffer too short: need at least {need} bytes, got {got}")]
    TooShort { need: usize, got: usize },

    #[error("not a RIFF/WAVE container")]
    NotWav,

    #[error("malformed wav: {0}")]
    Malformed(String),

    #[error("unsupported wav encoding: format {format}, {bits} bits per sample")]
    UnsupportedEncoding { format: u16, bits: u16 },
}

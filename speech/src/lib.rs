//! Speech-to-text collaborator contracts.
//!
//! The transcription path is a thin orchestration around external
//! recognition backends:
//!
//! - [`Transcriber`]: audio bytes plus a language hint -> [`Transcript`]
//! - [`Transcript`]: recognized text, or one of the user-facing soft
//!   failure states ("no speech detected", ...)
//! - [`TranscriberChain`]: ordered fallback across backends; a backend
//!   that is unavailable or rejects the input format yields to the next
//!
//! Soft failures stay values end to end. Only malformed input and backend
//! faults surface as [`SpeechError`].

mod error;
mod transcriber;
mod transcript;

pub use error::SpeechError;
pub use transcriber::{Transcriber, TranscriberChain};
pub use transcript::Transcript;

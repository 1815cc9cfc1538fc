use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use voicekin_audio::WavInfo;

use crate::error::SpeechError;
use crate::transcript::Transcript;

/// A speech-to-text collaborator: compressed or container audio bytes in,
/// tagged transcription outcome out.
///
/// `language` is a hint such as `"zh-CN"`; backends may ignore it.
/// Soft failures are [`Transcript`] variants; [`SpeechError`] is reserved
/// for malformed input and backend faults.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8], language: &str)
    -> Result<Transcript, SpeechError>;
}

/// Tries an ordered list of [`Transcriber`] backends until one produces a
/// final outcome.
///
/// A backend yields to the next one by answering
/// [`Transcript::ServiceUnavailable`] or failing with
/// [`SpeechError::UnsupportedFormat`]; every other outcome is final.
/// When all backends yield, the chain reports
/// [`Transcript::ServiceUnavailable`].
pub struct TranscriberChain {
    backends: Vec<Arc<dyn Transcriber>>,
}

impl TranscriberChain {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Appends a backend; earlier backends are tried first.
    pub fn push(&mut self, backend: Arc<dyn Transcriber>) {
        self.backends.push(backend);
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    pub async fn transcribe(
        &self,
        audio: &[u8],
        language: &str,
    ) -> Result<Transcript, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        if self.backends.is_empty() {
            return Err(SpeechError::NoTranscriber);
        }

        match WavInfo::parse(audio) {
            Ok(info) => debug!(
                bytes = audio.len(),
                sample_rate = info.sample_rate,
                channels = info.channels,
                "transcribing wav audio"
            ),
            Err(_) => debug!(bytes = audio.len(), "transcribing non-wav audio"),
        }

        for (i, backend) in self.backends.iter().enumerate() {
            match backend.transcribe(audio, language).await {
                Ok(Transcript::ServiceUnavailable) => {
                    warn!(backend = i, "transcriber unavailable, trying next");
                }
                Err(SpeechError::UnsupportedFormat(reason)) => {
                    warn!(backend = i, %reason, "transcriber rejected format, trying next");
                }
                other => return other,
            }
        }
        Ok(Transcript::ServiceUnavailable)
    }
}

impl Default for TranscriberChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for TranscriberChain {
    async fn transcribe(
        &self,
        audio: &[u8],
        language: &str,
    ) -> Result<Transcript, SpeechError> {
        TranscriberChain::transcribe(self, audio, language).await
    }
}

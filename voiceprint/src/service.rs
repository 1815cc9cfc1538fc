use std::sync::Arc;

use tracing::debug;
use voicekin_audio::AudioBuffer;

use crate::error::VoiceprintError;
use crate::features::FeatureVector;
use crate::similarity::{Verification, verify_features};
use crate::store::{MemoryStore, VoiceprintStore};

/// Facade over a [`VoiceprintStore`] and the similarity engine.
///
/// Registration, verification and removal delegate directly to the store
/// and scorer; the service adds no business logic of its own.
pub struct VerificationService {
    store: Arc<dyn VoiceprintStore>,
}

impl VerificationService {
    /// Creates a service over the given store backend.
    pub fn new(store: Arc<dyn VoiceprintStore>) -> Self {
        Self { store }
    }

    /// Creates a service backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Registers (or re-registers) a voiceprint for `user_id`.
    pub fn register_user(
        &self,
        user_id: &str,
        features: FeatureVector,
    ) -> Result<(), VoiceprintError> {
        self.store.register(user_id, features)?;
        debug!(user_id, "voiceprint registered");
        Ok(())
    }

    /// Scores `candidate` against the registered voiceprint for `user_id`.
    ///
    /// Fails closed: an unregistered user is reported as not verified with
    /// score 0.0, never as an error.
    pub fn verify_user(
        &self,
        user_id: &str,
        candidate: &FeatureVector,
        threshold: f32,
    ) -> Result<Verification, VoiceprintError> {
        let Some(record) = self.store.lookup(user_id)? else {
            debug!(user_id, "verification for unregistered user");
            return Ok(Verification::rejected());
        };
        let result = verify_features(&record.features, candidate, threshold);
        debug!(
            user_id,
            score = result.score as f64,
            verified = result.verified,
            "voiceprint verification"
        );
        Ok(result)
    }

    /// Removes the voiceprint for `user_id`, reporting whether one existed.
    pub fn remove_user(&self, user_id: &str) -> Result<bool, VoiceprintError> {
        let removed = self.store.remove(user_id)?;
        debug!(user_id, removed, "voiceprint removal");
        Ok(removed)
    }

    /// Extracts a voiceprint from `audio` and registers it for `user_id`.
    /// Returns the extracted features.
    pub fn enroll_audio(
        &self,
        user_id: &str,
        audio: &AudioBuffer,
    ) -> Result<FeatureVector, VoiceprintError> {
        let features = FeatureVector::from_audio(audio)?;
        self.register_user(user_id, features)?;
        Ok(features)
    }

    /// Extracts a voiceprint from `audio` and verifies it against the
    /// registered template for `user_id`.
    pub fn verify_audio(
        &self,
        user_id: &str,
        audio: &AudioBuffer,
        threshold: f32,
    ) -> Result<Verification, VoiceprintError> {
        let features = FeatureVector::from_audio(audio)?;
        self.verify_user(user_id, &features, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::DEFAULT_VERIFY_THRESHOLD;

    fn axis(index: usize) -> FeatureVector {
        let mut values = [0.0f32; 7];
        values[index] = 1.0;
        FeatureVector::from(values)
    }

    fn sine_audio(freq_hz: f64, n_samples: usize, sample_rate: u32) -> AudioBuffer {
        let samples = (0..n_samples)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (freq_hz * 2.0 * std::f64::consts::PI * t).sin() as f32
            })
            .collect();
        AudioBuffer::new(samples, sample_rate)
    }

    #[test]
    fn register_then_verify_same_features() {
        let service = VerificationService::in_memory();
        service.register_user("42", axis(0)).unwrap();

        let result = service.verify_user("42", &axis(0), 0.99).unwrap();
        assert!(result.verified);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn identical_features_verify_at_maximum_strictness() {
        let service = VerificationService::in_memory();
        service.register_user("alice", axis(3)).unwrap();

        let result = service.verify_user("alice", &axis(3), 1.0).unwrap();
        assert!(result.verified);
    }

    #[test]
    fn orthogonal_features_do_not_verify() {
        let service = VerificationService::in_memory();
        service.register_user("42", axis(0)).unwrap();

        let result = service.verify_user("42", &axis(1), 0.5).unwrap();
        assert!(!result.verified);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn unregistered_user_fails_closed() {
        let service = VerificationService::in_memory();
        let result = service
            .verify_user("nobody", &axis(0), DEFAULT_VERIFY_THRESHOLD)
            .unwrap();
        assert!(!result.verified);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn removed_user_fails_closed() {
        let service = VerificationService::in_memory();
        service.register_user("alice", axis(0)).unwrap();
        assert!(service.remove_user("alice").unwrap());
        assert!(!service.remove_user("alice").unwrap());

        let result = service
            .verify_user("alice", &axis(0), DEFAULT_VERIFY_THRESHOLD)
            .unwrap();
        assert!(!result.verified);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn reregistration_replaces_template() {
        let service = VerificationService::in_memory();
        service.register_user("alice", axis(0)).unwrap();
        assert!(!service.verify_user("alice", &axis(1), 0.5).unwrap().verified);

        service.register_user("alice", axis(1)).unwrap();
        assert!(service.verify_user("alice", &axis(1), 0.5).unwrap().verified);
    }

    #[test]
    fn zero_voiceprint_never_verifies() {
        // One second of digital silence extracts an all-zero voiceprint.
        let service = VerificationService::in_memory();
        let silence = AudioBuffer::new(vec![0.0; 16000], 16000);
        let features = service.enroll_audio("silent", &silence).unwrap();
        assert!(features.is_zero());

        // The zero-norm rule wins over self-similarity: score 0.0.
        let result = service
            .verify_audio("silent", &silence, DEFAULT_VERIFY_THRESHOLD)
            .unwrap();
        assert!(!result.verified);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn enroll_and_verify_from_audio() {
        let service = VerificationService::in_memory();
        let tone = sine_audio(440.0, 16000, 16000);

        let features = service.enroll_audio("alice", &tone).unwrap();
        assert!(!features.is_zero());

        let result = service.verify_audio("alice", &tone, 0.99).unwrap();
        assert!(result.verified);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn different_tones_score_below_identical() {
        let service = VerificationService::in_memory();
        let enrolled = sine_audio(440.0, 16000, 16000);
        let other = sine_audio(2000.0, 16000, 16000);
        service.enroll_audio("alice", &enrolled).unwrap();

        let same = service.verify_audio("alice", &enrolled, 0.0).unwrap();
        let different = service.verify_audio("alice", &other, 0.0).unwrap();
        assert!(different.score < same.score);
    }

    #[test]
    fn empty_audio_is_an_input_error() {
        let service = VerificationService::in_memory();
        let empty = AudioBuffer::new(Vec::new(), 16000);
        assert!(matches!(
            service.enroll_audio("alice", &empty),
            Err(VoiceprintError::EmptyAudio)
        ));
    }

    #[test]
    fn shared_store_across_services() {
        let store = Arc::new(MemoryStore::new());
        let enroller = VerificationService::new(store.clone());
        let verifier = VerificationService::new(store);

        enroller.register_user("alice", axis(0)).unwrap();
        let result = verifier.verify_user("alice", &axis(0), 0.9).unwrap();
        assert!(result.verified);
    }
}

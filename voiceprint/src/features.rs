use serde::{Deserialize, Serialize};
use voicekin_audio::AudioBuffer;

use crate::analyzer::{SignalStats, analyze};
use crate::error::VoiceprintError;

/// Number of scalars in a voiceprint.
pub const FEATURE_DIM: usize = 7;

/// A voiceprint: seven signal descriptors in a fixed order.
///
/// Position is semantically significant; similarity scoring assumes both
/// vectors were packed by [`FeatureVector::from_stats`]:
///
/// ```text
/// 0  mean absolute amplitude
/// 1  amplitude standard deviation
/// 2  zero-crossing rate
/// 3  spectral centroid (Hz)
/// 4  low band energy, up to 300 Hz
/// 5  mid band energy, (300, 1000] Hz
/// 6  high band energy, (1000, 3000] Hz
/// ```
///
/// Immutable once built. Serializes as a bare 7-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f32; FEATURE_DIM]);

impl FeatureVector {
    /// Packs analyzer output into the fixed feature order.
    pub fn from_stats(stats: &SignalStats) -> Self {
        Self([
            stats.mean_abs,
            stats.std_dev,
            stats.zero_crossing_rate,
            stats.spectral_centroid_hz,
            stats.low_band_energy,
            stats.mid_band_energy,
            stats.high_band_energy,
        ])
    }

    /// Analyzes raw samples and packs the voiceprint in one step.
    pub fn extract(samples: &[f32], sample_rate: u32) -> Result<Self, VoiceprintError> {
        Ok(Self::from_stats(&analyze(samples, sample_rate)?))
    }

    /// Extracts the voiceprint of a decoded audio clip.
    pub fn from_audio(audio: &AudioBuffer) -> Result<Self, VoiceprintError> {
        Self::extract(&audio.samples, audio.sample_rate)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// True when every component is exactly zero. A zero voiceprint never
    /// verifies, not even against itself; see
    /// [`cosine_similarity`](crate::cosine_similarity).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }
}

impl From<[f32; FEATURE_DIM]> for FeatureVector {
    fn from(values: [f32; FEATURE_DIM]) -> Self {
        Self(values)
    }
}

impl TryFrom<&[f32]> for FeatureVector {
    type Error = VoiceprintError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        let values: [f32; FEATURE_DIM] =
            values
                .try_into()
                .map_err(|_| VoiceprintError::DimensionMismatch {
                    expected: FEATURE_DIM,
                    got: values.len(),
                })?;
        Ok(Self(values))
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

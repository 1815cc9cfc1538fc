use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// Default score threshold for verification. Callers pass a threshold on
/// every verify call; this is the conventional strictness.
pub const DEFAULT_VERIFY_THRESHOLD: f32 = 0.8;

/// Outcome of comparing a candidate voiceprint against a registered one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// Whether the score met the threshold.
    pub verified: bool,
    /// Similarity score in [0, 1].
    pub score: f32,
}

impl Verification {
    /// The fail-closed outcome: unregistered user, removed user, zero-norm
    /// voiceprint.
    pub(crate) fn rejected() -> Self {
        Self {
            verified: false,
            score: 0.0,
        }
    }
}

/// Cosine similarity between two voiceprints, clamped to [0, 1].
///
/// Uses f64 intermediate precision. Returns 0.0 when either vector has
/// zero norm, including a zero vector compared against itself. A negative
/// cosine clamps to 0.0: anti-correlated voiceprints score the same as
/// orthogonal ones.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.as_slice().iter().zip(b.as_slice()) {
        let x = x as f64;
        let y = y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    similarity.clamp(0.0, 1.0) as f32
}

/// Scores `candidate` against `registered` and applies `threshold`.
pub fn verify_features(
    registered: &FeatureVector,
    candidate: &FeatureVector,
    threshold: f32,
) -> Verification {
    let score = cosine_similarity(registered, candidate);
    Verification {
        verified: score >= threshold,
        score,
    }
}

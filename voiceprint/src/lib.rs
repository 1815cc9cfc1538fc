//! Voiceprint extraction and similarity-based speaker verification.
//!
//! # Architecture
//!
//! The pipeline processes audio in four stages:
//!
//! 1. [`analyze`]: PCM samples -> [`SignalStats`] scalar descriptors
//! 2. [`FeatureVector::from_stats`]: descriptors -> fixed-order voiceprint
//! 3. [`VoiceprintStore`]: registered voiceprints keyed by user id
//! 4. [`cosine_similarity`] + per-call threshold -> [`Verification`]
//!
//! [`VerificationService`] ties the stages together: it registers, verifies
//! and removes voiceprints, and fails closed (not-verified, score 0.0) for
//! users that were never registered.
//!
//! # Feature Extraction
//!
//! A voiceprint is seven deterministic signal descriptors:
//! amplitude statistics (mean absolute, standard deviation), zero-crossing
//! rate, spectral centroid, and magnitude energy in three frequency bands
//! (up to 300 Hz, 300-1000 Hz, 1000-3000 Hz). Identical samples always
//! produce an identical voiceprint.

mod analyzer;
mod error;
mod features;
mod service;
mod similarity;
mod store;

pub use analyzer::{SignalStats, analyze};
pub use error::VoiceprintError;
pub use features::{FEATURE_DIM, FeatureVector};
pub use service::VerificationService;
pub use similarity::{DEFAULT_VERIFY_THRESHOLD, Verification, cosine_similarity, verify_features};
pub use store::{MemoryStore, VoiceprintRecord, VoiceprintStore};

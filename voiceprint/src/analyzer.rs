use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::error::VoiceprintError;

/// Upper edge of the low frequency band in Hz.
const LOW_BAND_MAX_HZ: f64 = 300.0;
/// Upper edge of the mid frequency band in Hz.
const MID_BAND_MAX_HZ: f64 = 1000.0;
/// Upper edge of the high frequency band in Hz. Spectrum above this
/// frequency is not attributed to any band.
const HIGH_BAND_MAX_HZ: f64 = 3000.0;

/// Scalar descriptors of one audio clip.
///
/// Produced by [`analyze`]; packed into a
/// [`FeatureVector`](crate::FeatureVector) in this field order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    /// Mean absolute sample amplitude.
    pub mean_abs: f32,
    /// Population standard deviation of the signed samples.
    pub std_dev: f32,
    /// Fraction of adjacent sample pairs whose sign class differs.
    pub zero_crossing_rate: f32,
    /// Magnitude-weighted mean frequency of the spectrum, in Hz.
    pub spectral_centroid_hz: f32,
    /// Spectral magnitude summed over bins up to 300 Hz.
    pub low_band_energy: f32,
    /// Spectral magnitude summed over bins in (300, 1000] Hz.
    pub mid_band_energy: f32,
    /// Spectral magnitude summed over bins in (1000, 3000] Hz.
    pub high_band_energy: f32,
}

/// Computes the scalar descriptors for one clip of PCM samples.
///
/// Pure and deterministic: identical samples and rate always yield
/// identical stats. Intermediate math runs in f64 and is narrowed to f32
/// on output.
///
/// The spectrum is the DFT of the whole buffer; only the non-negative
/// half is kept, bins `k` in `[0, n/2)` at `k * sample_rate / n` Hz.
/// A zero-magnitude spectrum yields a centroid of 0.0 instead of a
/// division by zero.
///
/// # Errors
///
/// [`VoiceprintError::EmptyAudio`] for an empty buffer,
/// [`VoiceprintError::InvalidSampleRate`] when `sample_rate` is zero.
pub fn analyze(samples: &[f32], sample_rate: u32) -> Result<SignalStats, VoiceprintError> {
    if samples.is_empty() {
        return Err(VoiceprintError::EmptyAudio);
    }
    if sample_rate == 0 {
        return Err(VoiceprintError::InvalidSampleRate { got: sample_rate });
    }

    let n = samples.len() as f64;

    let mut abs_sum = 0.0f64;
    let mut sum = 0.0f64;
    for &s in samples {
        abs_sum += (s as f64).abs();
        sum += s as f64;
    }
    let mean_abs = abs_sum / n;
    let mean = sum / n;

    let mut var_sum = 0.0f64;
    for &s in samples {
        let d = s as f64 - mean;
        var_sum += d * d;
    }
    let std_dev = (var_sum / n).sqrt();

    let zero_crossing_rate = zero_crossings(samples) as f64 / n;

    let magnitude = magnitude_spectrum(samples);
    let hz_per_bin = sample_rate as f64 / n;

    let mut magnitude_sum = 0.0f64;
    let mut weighted_sum = 0.0f64;
    let mut low = 0.0f64;
    let mut mid = 0.0f64;
    let mut high = 0.0f64;
    for (k, &m) in magnitude.iter().enumerate() {
        let freq = k as f64 * hz_per_bin;
        magnitude_sum += m;
        weighted_sum += freq * m;
        if freq <= LOW_BAND_MAX_HZ {
            low += m;
        } else if freq <= MID_BAND_MAX_HZ {
            mid += m;
        } else if freq <= HIGH_BAND_MAX_HZ {
            high += m;
        }
    }
    let spectral_centroid_hz = if magnitude_sum == 0.0 {
        0.0
    } else {
        weighted_sum / magnitude_sum
    };

    Ok(SignalStats {
        mean_abs: mean_abs as f32,
        std_dev: std_dev as f32,
        zero_crossing_rate: zero_crossing_rate as f32,
        spectral_centroid_hz: spectral_centroid_hz as f32,
        low_band_energy: low as f32,
        mid_band_energy: mid as f32,
        high_band_energy: high as f32,
    })
}

/// Three-valued sign: -1, 0 or +1. Exact zero is its own class, so a
/// pass through a zero sample counts as two crossings.
fn sign(x: f32) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

fn zero_crossings(samples: &[f32]) -> usize {
    samples
        .windows(2)
        .filter(|pair| sign(pair[0]) != sign(pair[1]))
        .count()
}

/// DFT magnitudes for the retained non-negative half, bins `[0, n/2)`.
/// Unnormalized forward transform; a single-sample buffer has no bins.
fn magnitude_spectrum(samples: &[f32]) -> Vec<f64> {
    let n = samples.len();
    let mut buf: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buf);

    buf.truncate(n / 2);
    buf.into_iter().map(|c| c.norm()).collect()
}

/// A decoded mono audio clip: samples in [-1, 1] plus the sample rate.
///
/// Buffers are produced once by a decoding step ([`AudioBuffer::from_pcm16`]
/// or [`decode_wav`](crate::decode_wav)) and consumed read-only by analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Decodes PCM16 signed little-endian bytes, normalizing samples to
    /// [-1, 1] by 1/32768. A trailing odd byte is ignored.
    pub fn from_pcm16(data: &[u8], sample_rate: u32) -> Self {
        let samples = data
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
            .collect();
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clip duration in seconds; 0.0 when the sample rate is 0.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

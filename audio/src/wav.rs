use crate::error::AudioError;
use crate::pcm::AudioBuffer;

/// WAVE format tag for uncompressed PCM.
const FORMAT_PCM: u16 = 1;

/// Shape of a RIFF/WAVE buffer, read from the `fmt ` chunk without decoding
/// any samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Size of the `data` chunk payload in bytes.
    pub data_len: usize,
}

impl WavInfo {
    /// Parses the RIFF header and locates the `fmt ` and `data` chunks.
    pub fn parse(data: &[u8]) -> Result<Self, AudioError> {
        scan(data).map(|(info, _)| info)
    }

    /// Clip duration derived from the data size and frame layout;
    /// 0.0 when the format fields cannot describe one.
    pub fn duration_secs(&self) -> f32 {
        let frame_bytes = self.channels as usize * (self.bits_per_sample as usize / 8);
        if frame_bytes == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        (self.data_len / frame_bytes) as f32 / self.sample_rate as f32
    }
}

/// Decodes a 16-bit PCM WAV buffer into a mono [`AudioBuffer`].
/// Multi-channel audio is downmixed by averaging each frame.
pub fn decode_wav(data: &[u8]) -> Result<AudioBuffer, AudioError> {
    let (info, body) = scan(data)?;
    if info.audio_format != FORMAT_PCM || info.bits_per_sample != 16 {
        return Err(AudioError::UnsupportedEncoding {
            format: info.audio_format,
            bits: info.bits_per_sample,
        });
    }
    if info.channels == 0 {
        return Err(AudioError::Malformed("fmt declares zero channels".into()));
    }

    let payload = &data[body..body + info.data_len];
    let channels = info.channels as usize;
    let frame_bytes = channels * 2;
    let mut samples = Vec::with_capacity(payload.len() / frame_bytes);
    for frame in payload.chunks_exact(frame_bytes) {
        let mut acc = 0.0f32;
        for pair in frame.chunks_exact(2) {
            acc += i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0;
        }
        samples.push(acc / channels as f32);
    }
    Ok(AudioBuffer::new(samples, info.sample_rate))
}

/// Walks the chunk list and returns the parsed info plus the offset of the
/// `data` chunk payload. The declared data size is clamped to the bytes
/// actually present.
fn scan(data: &[u8]) -> Result<(WavInfo, usize), AudioError> {
    if data.len() < 12 {
        return Err(AudioError::TooShort {
            need: 12,
            got: data.len(),
        });
    }
    if &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(AudioError::NotWav);
    }

    let mut fmt: Option<(u16, u16, u32, u16)> = None;
    let mut payload: Option<(usize, usize)> = None;

    let mut pos = 12usize;
    while pos + 8 <= data.len() {
        let id = &data[pos..pos + 4];
        let size = u32_le(data, pos + 4) as usize;
        let body = pos + 8;
        match id {
            b"fmt " => {
                if body + 16 > data.len() {
                    return Err(AudioError::Malformed("fmt chunk truncated".into()));
                }
                fmt = Some((
                    u16_le(data, body),
                    u16_le(data, body + 2),
                    u32_le(data, body + 4),
                    u16_le(data, body + 14),
                ));
            }
            b"data" => {
                payload = Some((body, size.min(data.len().saturating_sub(body))));
            }
            _ => {}
        }
        // Chunks are word-aligned; odd sizes carry a pad byte.
        pos = body.saturating_add(size).saturating_add(size & 1);
    }

    let (audio_format, channels, sample_rate, bits_per_sample) =
        fmt.ok_or_else(|| AudioError::Malformed("missing fmt chunk".into()))?;
    let (body, data_len) =
        payload.ok_or_else(|| AudioError::Malformed("missing data chunk".into()))?;

    Ok((
        WavInfo {
            audio_format,
            channels,
            sample_rate,
            bits_per_sample,
            data_len,
        },
        body,
    ))
}

fn u16_le(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn u32_le(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

// Minimal PCM WAV reader
//
// Sound effects ship as small 16-bit PCM files; anything fancier is out of
// scope. Multi-channel files are downmixed to mono.

use super::AudioError;

/// A decoded sound: mono samples in [-1, 1] at the file's sample rate
#[derive(Debug, Clone)]
pub struct Sound {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl Sound {
    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode a RIFF/WAVE file containing 16-bit PCM
pub fn decode_wav(bytes: &[u8]) -> Result<Sound, AudioError> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(AudioError::NotAWavFile);
    }

    let mut channels: Option<u16> = None;
    let mut sample_rate: Option<u32> = None;
    let mut bits_per_sample: Option<u16> = None;
    let mut data: Option<&[u8]> = None;

    // Walk the chunk list: 4-byte id, little-endian u32 size, payload
    // (padded to a word boundary).
    let mut offset = 12;
    while offset + 8 <= bytes.len() {
        let id = &bytes[offset..offset + 4];
        let size = u32::from_le_bytes([
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]) as usize;
        let payload_start = offset + 8;
        let payload_end = payload_start + size;
        if payload_end > bytes.len() {
            return Err(AudioError::Truncated);
        }
        let payload = &bytes[payload_start..payload_end];

        match id {
            b"fmt " => {
                if size < 16 {
                    return Err(AudioError::Truncated);
                }
                let format = u16::from_le_bytes([payload[0], payload[1]]);
                if format != 1 {
                    return Err(AudioError::UnsupportedFormat(format!(
                        "non-PCM format tag {}",
                        format
                    )));
                }
                channels = Some(u16::from_le_bytes([payload[2], payload[3]]));
                sample_rate = Some(u32::from_le_bytes([
                    payload[4], payload[5], payload[6], payload[7],
                ]));
                bits_per_sample = Some(u16::from_le_bytes([payload[14], payload[15]]));
            }
            b"data" => data = Some(payload),
            _ => {}
        }

        offset = payload_end + (size & 1);
    }

    let channels = channels.ok_or(AudioError::MissingChunk("fmt "))? as usize;
    let sample_rate = sample_rate.ok_or(AudioError::MissingChunk("fmt "))?;
    let bits = bits_per_sample.ok_or(AudioError::MissingChunk("fmt "))?;
    let data = data.ok_or(AudioError::MissingChunk("data"))?;

    if bits != 16 {
        return Err(AudioError::UnsupportedFormat(format!(
            "{} bits per sample",
            bits
        )));
    }
    if channels == 0 {
        return Err(AudioError::UnsupportedFormat("zero channels".to_string()));
    }

    let frame_bytes = channels * 2;
    let mut samples = Vec::with_capacity(data.len() / frame_bytes);
    for frame in data.chunks_exact(frame_bytes) {
        let mut sum = 0.0f32;
        for channel in frame.chunks_exact(2) {
            let value = i16::from_le_bytes([channel[0], channel[1]]);
            sum += value as f32 / 32768.0;
        }
        samples.push(sum / channels as f32);
    }

    Ok(Sound {
        sample_rate,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assemble a minimal 16-bit PCM WAV in memory
    fn wav_bytes(channels: u16, sample_rate: u32, frames: &[&[i16]]) -> Vec<u8> {
        let mut data = Vec::new();
        for frame in frames {
            assert_eq!(frame.len(), channels as usize);
            for &sample in *frame {
                data.extend_from_slice(&sample.to_le_bytes());
            }
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
        out.extend_from_slice(b"WAVE");

        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * channels as u32 * 2).to_le_bytes());
        out.extend_from_slice(&(channels * 2).to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());

        out.extend_from_slice(b"data");
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&data);
        out
    }

    #[test]
    fn test_decode_mono() {
        let bytes = wav_bytes(1, 44100, &[&[0], &[16384], &[-32768]]);
        let sound = decode_wav(&bytes).unwrap();

        assert_eq!(sound.sample_rate, 44100);
        assert_eq!(sound.samples.len(), 3);
        assert!((sound.samples[0] - 0.0).abs() < 1e-6);
        assert!((sound.samples[1] - 0.5).abs() < 1e-6);
        assert!((sound.samples[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_decode_stereo_downmixes() {
        let bytes = wav_bytes(2, 22050, &[&[16384, -16384], &[16384, 16384]]);
        let sound = decode_wav(&bytes).unwrap();

        assert_eq!(sound.sample_rate, 22050);
        assert_eq!(sound.samples.len(), 2);
        assert!((sound.samples[0] - 0.0).abs() < 1e-6);
        assert!((sound.samples[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_wav_bytes() {
        assert!(matches!(
            decode_wav(b"OggS....not a wav"),
            Err(AudioError::NotAWavFile)
        ));
    }

    #[test]
    fn test_rejects_unsupported_bit_depth() {
        let mut bytes = wav_bytes(1, 44100, &[&[0]]);
        // Patch bits-per-sample (offset 34) to 8
        bytes[34] = 8;
        assert!(matches!(
            decode_wav(&bytes),
            Err(AudioError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_duration() {
        let frames: Vec<&[i16]> = vec![&[0]; 50];
        let bytes = wav_bytes(1, 100, &frames);
        let sound = decode_wav(&bytes).unwrap();
        assert!((sound.duration() - 0.5).abs() < 1e-6);
    }
}

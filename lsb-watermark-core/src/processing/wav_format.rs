//! WAV serialization and channel utilities for sealed audio.
//!
//! Sealed files are always written as canonical 44-byte-header RIFF WAVE,
//! 16-bit little-endian PCM, regardless of the container they came from.

use crate::models::error::WatermarkError;
use crate::models::sample_buffer::SampleBuffer;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Sealed audio is always 16-bit.
pub const BIT_DEPTH: u16 = 16;

/// Generate a 44-byte WAV RIFF header for 16-bit PCM.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    36 + data_size
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * 2
/// [32-33]  block_align = channels * 2
/// [34-35]  16
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn generate_wav_header(sample_rate: u32, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let bytes_per_sample = BIT_DEPTH / 8;
    let byte_rate = sample_rate * channels as u32 * bytes_per_sample as u32;
    let block_align = channels * bytes_per_sample;
    let chunk_size = 36 + data_size;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&BIT_DEPTH.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Serialize a buffer as a complete WAV file image.
pub fn encode_wav(buffer: &SampleBuffer) -> Result<Vec<u8>, WatermarkError> {
    let data_size = buffer
        .samples()
        .len()
        .checked_mul(2)
        .and_then(|size| u32::try_from(size).ok())
        .filter(|size| size.checked_add(36).is_some())
        .ok_or_else(|| {
            WatermarkError::InvalidInput(format!(
                "{} samples exceed the 4 GiB WAV limit",
                buffer.samples().len()
            ))
        })?;

    let mut data = Vec::with_capacity(WAV_HEADER_SIZE + data_size as usize);
    data.extend_from_slice(&generate_wav_header(buffer.sample_rate(), buffer.channels(), data_size));
    for sample in buffer.samples() {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    Ok(data)
}

/// Downmix interleaved multi-channel audio to mono by averaging each frame.
pub fn downmix_to_mono(buffer: &SampleBuffer) -> Result<SampleBuffer, WatermarkError> {
    let channels = buffer.channels() as usize;
    if channels <= 1 {
        return Ok(buffer.clone());
    }
    let mono: Vec<i16> = buffer
        .samples()
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect();
    SampleBuffer::mono(mono, buffer.sample_rate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_riff_magic() {
        let header = generate_wav_header(48000, 2, 0);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(&header[8..12], b"WAVE");
        assert_eq!(&header[12..16], b"fmt ");
        assert_eq!(&header[36..40], b"data");
    }

    #[test]
    fn header_44khz_mono() {
        let header = generate_wav_header(44100, 1, 400);

        assert_eq!(u16::from_le_bytes([header[20], header[21]]), 1);
        assert_eq!(u16::from_le_bytes([header[22], header[23]]), 1);

        let sample_rate = u32::from_le_bytes([header[24], header[25], header[26], header[27]]);
        assert_eq!(sample_rate, 44100);

        let byte_rate = u32::from_le_bytes([header[28], header[29], header[30], header[31]]);
        assert_eq!(byte_rate, 88200);

        let block_align = u16::from_le_bytes([header[32], header[33]]);
        assert_eq!(block_align, 2);

        let chunk_size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        assert_eq!(chunk_size, 36 + 400);
    }

    #[test]
    fn encoded_wav_reads_back_with_hound() {
        let buffer = SampleBuffer::new(vec![1, -1, i16::MAX, i16::MIN, 1000, -1000], 22_050, 2).unwrap();
        let bytes = encode_wav(&buffer).unwrap();
        assert_eq!(bytes.len(), WAV_HEADER_SIZE + 12);

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 22_050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>().unwrap();
        assert_eq!(samples, buffer.samples());
    }

    #[test]
    fn downmix_stereo_to_mono() {
        let stereo = SampleBuffer::new(vec![100, 300, -50, -150, i16::MAX, i16::MAX], 8000, 2).unwrap();
        let mono = downmix_to_mono(&stereo).unwrap();
        assert_eq!(mono.channels(), 1);
        assert_eq!(mono.sample_rate(), 8000);
        assert_eq!(mono.samples(), &[200, -100, i16::MAX]);
    }

    #[test]
    fn downmix_mono_passthrough() {
        let buffer = SampleBuffer::mono(vec![1, 2, 3], 8000).unwrap();
        assert_eq!(downmix_to_mono(&buffer).unwrap(), buffer);
    }
}

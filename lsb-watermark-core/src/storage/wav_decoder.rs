use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use crate::models::error::WatermarkError;
use crate::models::sample_buffer::SampleBuffer;
use crate::traits::pcm_decoder::PcmDecoder;

/// [`PcmDecoder`] for RIFF/WAVE containers, backed by `hound`.
///
/// Only 16-bit integer PCM is accepted; anything else is reported as
/// [`WatermarkError::UnsupportedFormat`] rather than converted.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl WavDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl PcmDecoder for WavDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer, WatermarkError> {
        let mut reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| WatermarkError::DecodeFailed(format!("could not read WAV data: {}", e)))?;
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(WatermarkError::UnsupportedFormat(format!(
                "{}-bit {:?} samples, expected 16-bit integer PCM",
                spec.bits_per_sample, spec.sample_format
            )));
        }

        let samples = reader
            .samples::<i16>()
            .collect::<Result<Vec<i16>, _>>()
            .map_err(|e| WatermarkError::DecodeFailed(format!("could not read samples: {}", e)))?;

        log::debug!(
            "decoded {} samples at {} Hz, {} channel(s)",
            samples.len(),
            spec.sample_rate,
            spec.channels
        );
        SampleBuffer::new(samples, spec.sample_rate, spec.channels)
    }

    fn name(&self) -> &str {
        "wav"
    }
}

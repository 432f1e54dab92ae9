use crate::models::error::WatermarkError;
use crate::models::sample_buffer::SampleBuffer;

/// Turns an encoded audio container into 16-bit PCM.
///
/// The watermark core never parses containers itself. Sessions are generic
/// over this trait so a host can plug in any decoder (an ffmpeg bridge, a
/// symphonia pipeline, a test fake). [`WavDecoder`](crate::WavDecoder) is the
/// built-in implementation for RIFF/WAVE input.
pub trait PcmDecoder: Send + Sync {
    /// Decode `bytes` into interleaved samples, sample rate and channel count.
    fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer, WatermarkError>;

    /// Short human-readable decoder name, used in log output.
    fn name(&self) -> &str;
}

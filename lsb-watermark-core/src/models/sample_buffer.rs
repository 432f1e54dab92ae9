use super::error::WatermarkError;

/// Interleaved 16-bit PCM audio.
///
/// Samples are stored frame-major: `[F0C0, F0C1, ..., F1C0, F1C1, ...]`.
/// Construction guarantees a positive sample rate, at least one channel,
/// and a sample count that is a whole number of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl SampleBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Result<Self, WatermarkError> {
        if sample_rate == 0 {
            return Err(WatermarkError::InvalidInput("sample rate must be positive".into()));
        }
        if channels == 0 {
            return Err(WatermarkError::InvalidInput("channel count must be positive".into()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(WatermarkError::InvalidInput(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Convenience constructor for single-channel audio.
    pub fn mono(samples: Vec<i16>, sample_rate: u32) -> Result<Self, WatermarkError> {
        Self::new(samples, sample_rate, 1)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds at the buffer's sample rate.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Iterate one channel's samples in frame order.
    pub fn channel(&self, channel: usize) -> Result<impl Iterator<Item = i16> + '_, WatermarkError> {
        self.check_channel(channel)?;
        Ok(self
            .samples
            .iter()
            .skip(channel)
            .step_by(self.channels as usize)
            .copied())
    }

    pub(crate) fn check_channel(&self, channel: usize) -> Result<(), WatermarkError> {
        if channel >= self.channels as usize {
            return Err(WatermarkError::InvalidInput(format!(
                "working channel {} out of range for {}-channel audio",
                channel, self.channels
            )));
        }
        Ok(())
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

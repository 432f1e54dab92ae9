use crate::codec::bit_codec::{self, BITS_PER_CHAR};
use crate::codec::marker::{self, END_MARKER};
use crate::models::error::WatermarkError;
use crate::models::sample_buffer::SampleBuffer;

/// Writes a bitstream into the least-significant bits of one channel.
///
/// Bit `i` lands in frame `i` of the working channel. Every other channel,
/// and every frame past the end of the bitstream, is copied unchanged.
#[derive(Debug, Clone)]
pub struct LsbEmbedder {
    pub working_channel: usize,
}

impl LsbEmbedder {
    pub fn new(working_channel: usize) -> Self {
        Self { working_channel }
    }

    /// Frame the payload with the end marker and embed it.
    ///
    /// Returns a new buffer with the same rate and shape as `buffer`.
    pub fn embed(&self, buffer: &SampleBuffer, payload: &str) -> Result<SampleBuffer, WatermarkError> {
        if payload.contains(END_MARKER) {
            return Err(WatermarkError::InvalidInput(format!(
                "payload must not contain the end marker {:?}",
                END_MARKER
            )));
        }
        let bits = bit_codec::encode_text(&marker::with_marker(payload))?;
        self.embed_bits(buffer, &bits)
    }

    /// Embed a raw bitstream with no framing.
    pub fn embed_bits(&self, buffer: &SampleBuffer, bits: &[bool]) -> Result<SampleBuffer, WatermarkError> {
        buffer.check_channel(self.working_channel)?;

        let available = self.capacity_bits(buffer);
        if bits.len() > available {
            return Err(WatermarkError::Capacity {
                required: bits.len(),
                available,
            });
        }

        let stride = buffer.channels() as usize;
        let mut sealed = buffer.clone();
        let samples = sealed.samples_mut();
        for (frame, &bit) in bits.iter().enumerate() {
            let index = frame * stride + self.working_channel;
            samples[index] = set_lsb(samples[index], bit);
        }

        log::debug!(
            "embedded {} bits into channel {} ({} frames available)",
            bits.len(),
            self.working_channel,
            available
        );
        Ok(sealed)
    }

    /// Number of bits the working channel can hold.
    pub fn capacity_bits(&self, buffer: &SampleBuffer) -> usize {
        buffer.frames()
    }

    /// Number of payload characters that fit once the end marker is counted.
    pub fn capacity_chars(&self, buffer: &SampleBuffer) -> usize {
        (self.capacity_bits(buffer) / BITS_PER_CHAR).saturating_sub(END_MARKER.len())
    }
}

impl Default for LsbEmbedder {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Force bit 0 of a sample to `bit`, leaving the other fifteen bits alone.
pub fn set_lsb(sample: i16, bit: bool) -> i16 {
    if bit {
        sample | 1
    } else {
        sample & !1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_lsb_only_touches_bit_zero() {
        assert_eq!(set_lsb(1000, true), 1001);
        assert_eq!(set_lsb(1001, false), 1000);
        assert_eq!(set_lsb(-1, false), -2);
        assert_eq!(set_lsb(-2, true), -1);
        assert_eq!(set_lsb(i16::MIN, true), i16::MIN + 1);
        assert_eq!(set_lsb(i16::MAX, false), i16::MAX - 1);
    }

    #[test]
    fn hi_scenario_writes_prefix_and_keeps_tail() {
        let buffer = SampleBuffer::mono(vec![1000; 200], 8000).unwrap();
        let sealed = LsbEmbedder::default().embed(&buffer, "hi").unwrap();

        let expected = bit_codec::encode_text("hi[END]").unwrap();
        assert_eq!(expected.len(), 56);
        for (i, &bit) in expected.iter().enumerate() {
            assert_eq!(sealed.samples()[i] & 1 == 1, bit, "bit {}", i);
            assert_eq!(sealed.samples()[i] & !1, 1000);
        }
        assert!(sealed.samples()[56..].iter().all(|&s| s == 1000));
        assert_eq!(sealed.sample_rate(), 8000);
        assert_eq!(sealed.channels(), 1);
    }

    #[test]
    fn capacity_boundary() {
        let bits = vec![true; 64];
        let exact = SampleBuffer::mono(vec![0; 64], 8000).unwrap();
        assert!(LsbEmbedder::default().embed_bits(&exact, &bits).is_ok());

        let short = SampleBuffer::mono(vec![0; 63], 8000).unwrap();
        assert_eq!(
            LsbEmbedder::default().embed_bits(&short, &bits),
            Err(WatermarkError::Capacity {
                required: 64,
                available: 63,
            })
        );
    }

    #[test]
    fn payload_capacity_boundary() {
        // "abc[END]" is 8 characters, 64 bits.
        let exact = SampleBuffer::mono(vec![0; 64], 8000).unwrap();
        assert!(LsbEmbedder::default().embed(&exact, "abc").is_ok());
        assert!(matches!(
            LsbEmbedder::default().embed(&exact, "abcd"),
            Err(WatermarkError::Capacity { required: 72, available: 64 })
        ));
    }

    #[test]
    fn only_working_channel_changes() {
        let samples: Vec<i16> = (0..400).map(|i| (i * 37 - 5000) as i16).collect();
        let buffer = SampleBuffer::new(samples, 44_100, 2).unwrap();
        let sealed = LsbEmbedder::new(0).embed(&buffer, "stereo").unwrap();

        let before: Vec<i16> = buffer.channel(1).unwrap().collect();
        let after: Vec<i16> = sealed.channel(1).unwrap().collect();
        assert_eq!(before, after);
        assert_eq!(sealed.frames(), buffer.frames());
    }

    #[test]
    fn second_channel_can_carry_payload() {
        let buffer = SampleBuffer::new(vec![7; 200], 8000, 2).unwrap();
        let sealed = LsbEmbedder::new(1).embed(&buffer, "r").unwrap();

        assert!(sealed.channel(0).unwrap().all(|s| s == 7));
        assert_ne!(buffer, sealed);
    }

    #[test]
    fn rejects_out_of_range_channel() {
        let buffer = SampleBuffer::mono(vec![0; 100], 8000).unwrap();
        assert!(matches!(
            LsbEmbedder::new(1).embed(&buffer, "x"),
            Err(WatermarkError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_payload_containing_marker() {
        let buffer = SampleBuffer::mono(vec![0; 1000], 8000).unwrap();
        assert!(matches!(
            LsbEmbedder::default().embed(&buffer, "a[END]b"),
            Err(WatermarkError::InvalidInput(_))
        ));
    }

    #[test]
    fn alphabet_error_surfaces_before_capacity() {
        let buffer = SampleBuffer::mono(vec![0; 8], 8000).unwrap();
        assert!(matches!(
            LsbEmbedder::default().embed(&buffer, "日本"),
            Err(WatermarkError::Alphabet { position: 0, .. })
        ));
    }

    #[test]
    fn capacity_chars_excludes_marker() {
        let buffer = SampleBuffer::mono(vec![0; 200], 8000).unwrap();
        assert_eq!(LsbEmbedder::default().capacity_chars(&buffer), 20);

        let tiny = SampleBuffer::mono(vec![0; 16], 8000).unwrap();
        assert_eq!(LsbEmbedder::default().capacity_chars(&tiny), 0);
    }
}

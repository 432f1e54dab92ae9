use crate::codec::bit_codec::{self, BITS_PER_CHAR};
use crate::codec::marker;
use crate::models::config::DEFAULT_SCAN_LIMIT_BITS;
use crate::models::detection::Detection;
use crate::models::error::WatermarkError;
use crate::models::sample_buffer::SampleBuffer;

/// Recovers a marker-terminated message from one channel's LSBs.
///
/// The scan is forward-only: one bit per frame, a character every eight
/// frames counted from frame zero, stopping at the first end marker. It
/// gives up after `scan_limit_bits` frames or at the end of the channel.
#[derive(Debug, Clone)]
pub struct LsbExtractor {
    pub working_channel: usize,
    pub scan_limit_bits: usize,
}

impl LsbExtractor {
    pub fn new(working_channel: usize, scan_limit_bits: usize) -> Self {
        Self {
            working_channel,
            scan_limit_bits,
        }
    }

    /// Scan `buffer` for an embedded message.
    ///
    /// Only an out-of-range working channel is an error; audio that carries
    /// no message yields [`Detection::NotFound`].
    pub fn detect(&self, buffer: &SampleBuffer) -> Result<Detection, WatermarkError> {
        let channel = buffer.channel(self.working_channel)?;

        let mut text = String::new();
        let mut group = 0u8;
        let mut filled = 0;
        let mut skipped = 0usize;
        let mut scanned = 0usize;

        for sample in channel.take(self.scan_limit_bits) {
            scanned += 1;
            group = (group << 1) | (sample & 1) as u8;
            filled += 1;
            if filled < BITS_PER_CHAR {
                continue;
            }

            let byte = group;
            group = 0;
            filled = 0;

            let Some(character) = bit_codec::decode_byte(byte) else {
                skipped += 1;
                continue;
            };
            text.push(character);

            if let Some(message) = marker::strip_trailing_marker(&text) {
                log::debug!(
                    "found end marker after {} frames ({} empty groups skipped)",
                    scanned,
                    skipped
                );
                return Ok(Detection::Found(message.to_string()));
            }
        }

        log::debug!(
            "no end marker in {} frames of channel {} ({} empty groups skipped)",
            scanned,
            self.working_channel,
            skipped
        );
        Ok(Detection::NotFound)
    }
}

impl Default for LsbExtractor {
    fn default() -> Self {
        Self::new(0, DEFAULT_SCAN_LIMIT_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::embedder::{set_lsb, LsbEmbedder};

    fn with_bits(values: &[i16], bits: &[bool]) -> Vec<i16> {
        let mut samples = values.to_vec();
        for (sample, &bit) in samples.iter_mut().zip(bits) {
            *sample = set_lsb(*sample, bit);
        }
        samples
    }

    #[test]
    fn recovers_hi() {
        let buffer = SampleBuffer::mono(vec![1000; 200], 8000).unwrap();
        let sealed = LsbEmbedder::default().embed(&buffer, "hi").unwrap();

        assert_eq!(
            LsbExtractor::default().detect(&sealed).unwrap(),
            Detection::Found("hi".into())
        );
    }

    #[test]
    fn silence_is_not_found() {
        let buffer = SampleBuffer::mono(vec![0; 50_000], 44_100).unwrap();
        assert_eq!(LsbExtractor::default().detect(&buffer).unwrap(), Detection::NotFound);
    }

    #[test]
    fn empty_buffer_is_not_found() {
        let buffer = SampleBuffer::mono(Vec::new(), 44_100).unwrap();
        assert_eq!(LsbExtractor::default().detect(&buffer).unwrap(), Detection::NotFound);
    }

    #[test]
    fn zero_group_prefix_does_not_disturb_scan() {
        let mut stream = vec![false; 24];
        stream.extend(bit_codec::encode_text("hi[END]").unwrap());
        let samples = with_bits(&[-300; 200], &stream);
        let buffer = SampleBuffer::mono(samples, 8000).unwrap();

        assert_eq!(
            LsbExtractor::default().detect(&buffer).unwrap(),
            Detection::Found("hi".into())
        );
    }

    #[test]
    fn zero_groups_inside_message_are_dropped() {
        let mut stream = bit_codec::encode_text("h").unwrap();
        stream.extend([false; 8]);
        stream.extend(bit_codec::encode_text("i[END]").unwrap());
        let buffer = SampleBuffer::mono(with_bits(&[0; 128], &stream), 8000).unwrap();

        assert_eq!(
            LsbExtractor::default().detect(&buffer).unwrap(),
            Detection::Found("hi".into())
        );
    }

    #[test]
    fn marker_past_scan_limit_is_not_found() {
        let buffer = SampleBuffer::mono(vec![0; 400], 8000).unwrap();
        let sealed = LsbEmbedder::default().embed(&buffer, "hello").unwrap();

        // "hello[END]" needs 80 frames.
        assert_eq!(
            LsbExtractor::new(0, 79).detect(&sealed).unwrap(),
            Detection::NotFound
        );
        assert_eq!(
            LsbExtractor::new(0, 80).detect(&sealed).unwrap(),
            Detection::Found("hello".into())
        );
    }

    #[test]
    fn truncated_marker_is_not_found() {
        let stream = bit_codec::encode_text("hi[END").unwrap();
        let buffer = SampleBuffer::mono(with_bits(&vec![0; stream.len()], &stream), 8000).unwrap();
        assert_eq!(LsbExtractor::default().detect(&buffer).unwrap(), Detection::NotFound);
    }

    #[test]
    fn reads_only_the_working_channel() {
        let mono = SampleBuffer::mono(vec![0; 100], 8000).unwrap();
        let carrier = LsbEmbedder::default().embed(&mono, "L").unwrap();
        let interleaved: Vec<i16> = carrier
            .samples()
            .iter()
            .flat_map(|&left| [left, -1])
            .collect();
        let stereo = SampleBuffer::new(interleaved, 8000, 2).unwrap();

        assert_eq!(
            LsbExtractor::new(0, DEFAULT_SCAN_LIMIT_BITS).detect(&stereo).unwrap(),
            Detection::Found("L".into())
        );
        assert_eq!(
            LsbExtractor::new(1, DEFAULT_SCAN_LIMIT_BITS).detect(&stereo).unwrap(),
            Detection::NotFound
        );
    }

    #[test]
    fn empty_payload_round_trips() {
        let buffer = SampleBuffer::mono(vec![5; 40], 8000).unwrap();
        let sealed = LsbEmbedder::default().embed(&buffer, "").unwrap();
        assert_eq!(
            LsbExtractor::default().detect(&sealed).unwrap(),
            Detection::Found(String::new())
        );
    }

    #[test]
    fn negative_samples_round_trip() {
        let samples: Vec<i16> = (0..800).map(|i| -((i * 41) % 32768) as i16).collect();
        let buffer = SampleBuffer::mono(samples, 22_050).unwrap();
        let sealed = LsbEmbedder::default().embed(&buffer, "Señal ¿oculta?").unwrap();

        assert_eq!(
            LsbExtractor::default().detect(&sealed).unwrap().message(),
            Some("Señal ¿oculta?")
        );
    }
}

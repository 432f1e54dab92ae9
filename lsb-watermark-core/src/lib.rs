//! # lsb-watermark-core
//!
//! Hides a short text message in the least-significant bits of 16-bit PCM
//! audio and recovers it again.
//!
//! The message is framed with a trailing `[END]` marker, converted to eight
//! bits per character and written one bit per frame into a working channel
//! (channel 0 unless configured otherwise). Detection reads the same LSBs
//! forward until the marker appears or a scan limit is reached.
//!
//! ## Architecture
//!
//! ```text
//! lsb-watermark-core (this crate)
//! ├── codec/       ← 8-bit text ⇄ bit codec, end marker framing
//! ├── models/      ← SampleBuffer, Detection, WatermarkError, WatermarkConfiguration, metadata
//! ├── processing/  ← LsbEmbedder, LsbExtractor, WAV serialization, downmix
//! ├── session/     ← WatermarkSession (decode → embed → sealed file)
//! ├── storage/     ← WavDecoder, SealedFileWriter, JSON sidecar
//! └── traits/      ← PcmDecoder
//! ```
//!
//! ## Usage
//! ```
//! use lsb_watermark_core::{detect, embed, Detection, SampleBuffer};
//!
//! let carrier = SampleBuffer::mono(vec![1000; 200], 44_100).unwrap();
//! let sealed = embed(&carrier, "hi").unwrap();
//! assert_eq!(detect(&sealed).unwrap(), Detection::Found("hi".into()));
//! ```

pub mod codec;
pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use codec::bit_codec::{decode_bits, encode_text};
pub use codec::marker::{strip_marker, with_marker, END_MARKER};
pub use models::config::{WatermarkConfiguration, DEFAULT_SCAN_LIMIT_BITS};
pub use models::detection::{Detection, NOT_FOUND_SENTINEL};
pub use models::error::WatermarkError;
pub use models::sample_buffer::SampleBuffer;
pub use models::watermark_result::{EmbedResult, WatermarkMetadata};
pub use processing::embedder::LsbEmbedder;
pub use processing::extractor::LsbExtractor;
pub use session::watermark_session::WatermarkSession;
pub use storage::sealed_writer::SealedFileWriter;
pub use storage::wav_decoder::WavDecoder;
pub use traits::pcm_decoder::PcmDecoder;

/// Embed `payload` into channel 0 of `samples`.
///
/// Returns a new buffer with the same rate and shape.
pub fn embed(samples: &SampleBuffer, payload: &str) -> Result<SampleBuffer, WatermarkError> {
    LsbEmbedder::default().embed(samples, payload)
}

/// Scan channel 0 of `samples` for a message, using the default scan limit.
pub fn detect(samples: &SampleBuffer) -> Result<Detection, WatermarkError> {
    LsbExtractor::default().detect(samples)
}

use std::fs;
use std::path::Path;

use crate::codec::bit_codec::BITS_PER_CHAR;
use crate::codec::marker::END_MARKER;
use crate::models::config::WatermarkConfiguration;
use crate::models::detection::Detection;
use crate::models::error::WatermarkError;
use crate::models::sample_buffer::SampleBuffer;
use crate::models::watermark_result::{EmbedResult, WatermarkMetadata};
use crate::processing::embedder::LsbEmbedder;
use crate::processing::extractor::LsbExtractor;
use crate::processing::wav_format;
use crate::storage::metadata;
use crate::storage::sealed_writer::SealedFileWriter;
use crate::traits::pcm_decoder::PcmDecoder;

/// File-level watermark workflow.
///
/// Generic over the container decoder via [`PcmDecoder`]. Handles payload
/// checks, optional downmixing, embedding, sealed-file output and sidecar
/// metadata:
/// ```text
/// [bytes] → [PcmDecoder] → (downmix) → [LsbEmbedder] → [SealedFileWriter] → sealed_*.wav
/// [bytes] → [PcmDecoder] → [LsbExtractor] → Detection
/// ```
pub struct WatermarkSession<D: PcmDecoder> {
    decoder: D,
    config: WatermarkConfiguration,
    embedder: LsbEmbedder,
    extractor: LsbExtractor,
    writer: SealedFileWriter,
}

impl<D: PcmDecoder> WatermarkSession<D> {
    pub fn new(decoder: D, config: WatermarkConfiguration) -> Result<Self, WatermarkError> {
        config.validate().map_err(WatermarkError::InvalidInput)?;

        Ok(Self {
            decoder,
            embedder: LsbEmbedder::new(config.working_channel),
            extractor: LsbExtractor::new(config.working_channel, config.scan_limit_bits),
            writer: SealedFileWriter::new(config.output_directory.clone(), config.output_prefix.clone()),
            config,
        })
    }

    pub fn config(&self) -> &WatermarkConfiguration {
        &self.config
    }

    /// Decode `input` and prepare it for embedding.
    fn carrier(&self, input: &[u8]) -> Result<SampleBuffer, WatermarkError> {
        let buffer = self.decoder.decode(input)?;
        if self.config.downmix_to_mono {
            return wav_format::downmix_to_mono(&buffer);
        }
        Ok(buffer)
    }

    /// Embed `payload` into the decoded `input` and write the sealed file.
    ///
    /// `file_name` is the caller's name for the input; only its stem is used
    /// to name the output.
    pub fn embed_bytes(&self, input: &[u8], file_name: &str, payload: &str) -> Result<EmbedResult, WatermarkError> {
        if payload.trim().is_empty() {
            return Err(WatermarkError::InvalidInput("watermark text cannot be empty".into()));
        }

        let carrier = self.carrier(input)?;
        let sealed = self.embedder.embed(&carrier, payload)?;

        let payload_bits = (payload.chars().count() + END_MARKER.len()) * BITS_PER_CHAR;
        if payload_bits > self.config.scan_limit_bits {
            log::warn!(
                "message needs {} bits but detection stops after {}; it will not be recoverable with this configuration",
                payload_bits,
                self.config.scan_limit_bits
            );
        }

        let file_path = self.writer.sealed_path(file_name);
        let checksum = self.writer.write(&file_path, &sealed)?;

        let metadata = WatermarkMetadata::new(
            &file_path.to_string_lossy(),
            &checksum,
            sealed.sample_rate(),
            sealed.channels(),
            sealed.frames(),
            self.config.working_channel,
            payload_bits,
        );
        if self.config.write_metadata {
            metadata::write_metadata(&metadata, &file_path)?;
        }

        log::info!(
            "sealed {} ({} decoder, {} frames, {} bits)",
            file_path.display(),
            self.decoder.name(),
            sealed.frames(),
            payload_bits
        );

        Ok(EmbedResult {
            file_path,
            duration_secs: sealed.duration_secs(),
            metadata,
            checksum,
        })
    }

    /// Read `path` and embed `payload` into it.
    pub fn embed_file(&self, path: &Path, payload: &str) -> Result<EmbedResult, WatermarkError> {
        let input = read_input(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.embed_bytes(&input, &file_name, payload)
    }

    /// Scan the decoded `input` for a message.
    pub fn detect_bytes(&self, input: &[u8]) -> Result<Detection, WatermarkError> {
        let buffer = self.decoder.decode(input)?;
        let detection = self.extractor.detect(&buffer)?;
        log::info!(
            "detection via {} decoder: {}",
            self.decoder.name(),
            if detection.is_found() { "message found" } else { "no message" }
        );
        Ok(detection)
    }

    /// Read `path` and scan it for a message.
    pub fn detect_file(&self, path: &Path) -> Result<Detection, WatermarkError> {
        let input = read_input(path)?;
        self.detect_bytes(&input)
    }

    /// Payload characters the decoded `input` can carry under this configuration.
    pub fn capacity_chars(&self, input: &[u8]) -> Result<usize, WatermarkError> {
        let carrier = self.carrier(input)?;
        carrier.check_channel(self.config.working_channel)?;
        Ok(self.embedder.capacity_chars(&carrier))
    }

    /// Read `path` and report how many payload characters it can carry.
    pub fn capacity_file(&self, path: &Path) -> Result<usize, WatermarkError> {
        let input = read_input(path)?;
        self.capacity_chars(&input)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, WatermarkError> {
    fs::read(path).map_err(|e| WatermarkError::StorageError(format!("failed to read {}: {}", path.display(), e)))
}

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::error::WatermarkError;
use crate::models::sample_buffer::SampleBuffer;
use crate::processing::wav_format;

/// Writes watermarked audio into an output directory as 16-bit WAV.
///
/// Output names follow `{prefix}{input stem}.wav`, so `song.mp3` becomes
/// `sealed_song.wav` with the default prefix. The SHA-256 checksum of the
/// written file is returned for bookkeeping.
#[derive(Debug, Clone)]
pub struct SealedFileWriter {
    output_directory: PathBuf,
    prefix: String,
}

impl SealedFileWriter {
    pub fn new(output_directory: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            output_directory,
            prefix: prefix.into(),
        }
    }

    /// Output path for an input file name.
    ///
    /// Only the final component of `input_name` is used, so directory parts
    /// of an uploaded name cannot escape the output directory.
    pub fn sealed_path(&self, input_name: &str) -> PathBuf {
        let stem = Path::new(input_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty() && s != "..")
            .unwrap_or_else(|| "audio".to_string());
        self.output_directory.join(format!("{}{}.wav", self.prefix, stem))
    }

    /// Serialize `buffer` to `path`, returning the file's SHA-256 hex digest.
    pub fn write(&self, path: &Path, buffer: &SampleBuffer) -> Result<String, WatermarkError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| WatermarkError::StorageError(format!("failed to create directory: {}", e)))?;
        }

        let data = wav_format::encode_wav(buffer)?;

        let mut file = File::create(path)
            .map_err(|e| WatermarkError::StorageError(format!("failed to create file: {}", e)))?;
        file.write_all(&data)
            .map_err(|e| WatermarkError::StorageError(format!("write failed: {}", e)))?;
        file.flush()
            .map_err(|e| WatermarkError::StorageError(e.to_string()))?;

        log::debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(sha256_hex(&data))
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }
}

/// Compute the SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

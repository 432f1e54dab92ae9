use std::path::PathBuf;

use crate::codec::marker::END_MARKER;

/// Default extraction bound: 40 000 bits, roughly 5 000 characters.
pub const DEFAULT_SCAN_LIMIT_BITS: usize = 40_000;

/// Configuration for a watermark session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkConfiguration {
    /// Channel index that carries the bitstream (default: 0).
    pub working_channel: usize,

    /// Maximum number of working-channel samples the detector reads before
    /// giving up (default: 40 000).
    pub scan_limit_bits: usize,

    /// Average all channels into one before embedding (default: false).
    pub downmix_to_mono: bool,

    /// Directory where sealed files are written.
    pub output_directory: PathBuf,

    /// File name prefix for sealed files (default: `sealed_`).
    pub output_prefix: String,

    /// Write a JSON sidecar next to each sealed file (default: true).
    pub write_metadata: bool,
}

impl WatermarkConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        let marker_bits = END_MARKER.len() * 8;
        if self.scan_limit_bits < marker_bits {
            return Err(format!(
                "scan limit must cover at least the end marker ({} bits), got {}",
                marker_bits, self.scan_limit_bits
            ));
        }
        if self.downmix_to_mono && self.working_channel != 0 {
            return Err(format!(
                "working channel must be 0 when downmixing to mono, got {}",
                self.working_channel
            ));
        }
        if self.output_prefix.is_empty() {
            return Err("output prefix must not be empty".to_string());
        }
        if self.output_prefix.contains(|c| c == '/' || c == '\\') {
            return Err(format!("output prefix must not contain path separators: {:?}", self.output_prefix));
        }
        Ok(())
    }
}

impl Default for WatermarkConfiguration {
    fn default() -> Self {
        Self {
            working_channel: 0,
            scan_limit_bits: DEFAULT_SCAN_LIMIT_BITS,
            downmix_to_mono: false,
            output_directory: PathBuf::from("."),
            output_prefix: "sealed_".to_string(),
            write_metadata: true,
        }
    }
}

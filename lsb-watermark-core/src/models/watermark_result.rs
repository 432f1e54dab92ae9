use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codec::marker::END_MARKER;

/// Result returned when a session seals a file successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedResult {
    pub file_path: PathBuf,
    pub duration_secs: f64,
    pub metadata: WatermarkMetadata,
    pub checksum: String,
}

/// Metadata stored alongside a sealed file.
///
/// Describes the carrier, never the payload itself: only its bit length is
/// recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkMetadata {
    pub id: String,
    pub created_at: String,
    pub file_path: String,
    pub checksum: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: usize,
    pub duration_secs: f64,
    pub working_channel: usize,
    pub payload_bits: usize,
    pub marker: String,
}

impl WatermarkMetadata {
    /// Creates metadata for a freshly sealed file.
    pub fn new(
        file_path: &str,
        checksum: &str,
        sample_rate: u32,
        channels: u16,
        frames: usize,
        working_channel: usize,
        payload_bits: usize,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            file_path: file_path.to_string(),
            checksum: checksum.to_string(),
            sample_rate,
            channels,
            frames,
            duration_secs: frames as f64 / sample_rate as f64,
            working_channel,
            payload_bits,
            marker: END_MARKER.to_string(),
        }
    }
}

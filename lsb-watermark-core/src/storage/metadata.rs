use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::WatermarkError;
use crate::models::watermark_result::WatermarkMetadata;

/// Sidecar location for a sealed file: `{stem}.metadata.json` next to it.
pub fn metadata_path(sealed_path: &Path) -> PathBuf {
    sealed_path.with_extension("metadata.json")
}

/// Write metadata as a JSON sidecar file.
pub fn write_metadata(metadata: &WatermarkMetadata, sealed_path: &Path) -> Result<PathBuf, WatermarkError> {
    let path = metadata_path(sealed_path);
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| WatermarkError::StorageError(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&path, json)
        .map_err(|e| WatermarkError::StorageError(format!("failed to write metadata: {}", e)))?;
    Ok(path)
}

/// Read metadata from a JSON sidecar file.
pub fn read_metadata(sealed_path: &Path) -> Result<WatermarkMetadata, WatermarkError> {
    let path = metadata_path(sealed_path);
    let json = fs::read_to_string(&path)
        .map_err(|e| WatermarkError::StorageError(format!("failed to read metadata: {}", e)))?;
    serde_json::from_str(&json)
        .map_err(|e| WatermarkError::StorageError(format!("failed to parse metadata: {}", e)))
}

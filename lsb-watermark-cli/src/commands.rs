use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use lsb_watermark_core::{WatermarkConfiguration, WatermarkSession, WavDecoder, DEFAULT_SCAN_LIMIT_BITS};

use crate::Cli;

/// Info about a sealed file, printed with `--json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedInfo {
    pub file_path: String,
    pub checksum: String,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub payload_bits: usize,
}

/// Detection outcome, printed with `--json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionInfo {
    pub found: bool,
    pub watermark: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityInfo {
    pub file_path: String,
    pub characters: usize,
}

#[derive(Args)]
pub struct EmbedCommand {
    /// Input WAV file (16-bit PCM)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Text to hide
    #[arg(short, long)]
    pub message: String,

    /// Directory for the sealed file
    #[arg(short, long, default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Average all channels to mono before embedding
    #[arg(long)]
    pub mono: bool,

    /// Skip writing the JSON metadata sidecar
    #[arg(long)]
    pub no_metadata: bool,
}

impl EmbedCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = WatermarkConfiguration {
            working_channel: cli.channel,
            downmix_to_mono: self.mono,
            output_directory: self.output_dir.clone(),
            write_metadata: !self.no_metadata,
            ..Default::default()
        };
        log::debug!("session configuration: {:?}", config);
        let session = WatermarkSession::new(WavDecoder::new(), config)?;

        let result = session
            .embed_file(&self.input, &self.message)
            .with_context(|| format!("failed to embed watermark into {}", self.input.display()))?;

        if cli.json {
            let info = SealedInfo {
                file_path: result.file_path.to_string_lossy().to_string(),
                checksum: result.checksum,
                duration_secs: result.duration_secs,
                sample_rate: result.metadata.sample_rate,
                channels: result.metadata.channels,
                payload_bits: result.metadata.payload_bits,
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("Sealed file: {}", result.file_path.display());
            println!("SHA-256:     {}", result.checksum);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct DetectCommand {
    /// Input WAV file (16-bit PCM)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Stop scanning after this many samples
    #[arg(long, default_value_t = DEFAULT_SCAN_LIMIT_BITS)]
    pub scan_limit: usize,
}

impl DetectCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = WatermarkConfiguration {
            working_channel: cli.channel,
            scan_limit_bits: self.scan_limit,
            ..Default::default()
        };
        log::debug!("session configuration: {:?}", config);
        let session = WatermarkSession::new(WavDecoder::new(), config)?;

        let detection = session
            .detect_file(&self.input)
            .with_context(|| format!("failed to scan {}", self.input.display()))?;

        if cli.json {
            let info = DetectionInfo {
                found: detection.is_found(),
                watermark: detection.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("{}", detection);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct CapacityCommand {
    /// Input WAV file (16-bit PCM)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Count capacity after averaging to mono
    #[arg(long)]
    pub mono: bool,
}

impl CapacityCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = WatermarkConfiguration {
            working_channel: cli.channel,
            downmix_to_mono: self.mono,
            ..Default::default()
        };
        log::debug!("session configuration: {:?}", config);
        let session = WatermarkSession::new(WavDecoder::new(), config)?;
        let characters = session.capacity_file(&self.input)?;

        if cli.json {
            let info = CapacityInfo {
                file_path: self.input.to_string_lossy().to_string(),
                characters,
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("{} characters", characters);
        }
        Ok(())
    }
}

//! lsbmark - embed and detect LSB text watermarks in WAV files.

use clap::{Parser, Subcommand};

mod commands;

use commands::{CapacityCommand, DetectCommand, EmbedCommand};

/// Hide a short text message in the least-significant bits of 16-bit PCM
/// audio, or recover one.
///
/// Sealed files are written as `sealed_<name>.wav` with a JSON sidecar
/// describing the carrier. Set `RUST_LOG=debug` for scan details.
#[derive(Parser)]
#[command(name = "lsbmark")]
#[command(about = "LSB audio watermark tool")]
#[command(version)]
pub struct Cli {
    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Channel that carries the message
    #[arg(long, global = true, default_value_t = 0)]
    pub channel: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Embed a message and write a sealed WAV file
    Embed(EmbedCommand),
    /// Recover a message from a WAV file
    Detect(DetectCommand),
    /// Report how many characters a WAV file can carry
    Capacity(CapacityCommand),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Embed(cmd) => cmd.run(&cli),
        Commands::Detect(cmd) => cmd.run(&cli),
        Commands::Capacity(cmd) => cmd.run(&cli),
    }
}

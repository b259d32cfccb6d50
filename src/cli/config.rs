// CLI configuration
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use wavify::AudioParams;

use super::output::OutputFormat;

/// Wavify - wrap arbitrary bytes in a playable WAV container
#[derive(Parser, Debug)]
#[command(name = "wavify")]
#[command(about = "Turn any file into a playable PCM WAV file, and back", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format for header information
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (show more details)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Audio parameters written into the header
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ParamArgs {
    /// Number of interleaved channels
    #[arg(short, long, default_value_t = AudioParams::default().channels)]
    pub channels: u16,

    /// Samples per second per channel
    #[arg(short = 'r', long, default_value_t = AudioParams::default().sample_rate)]
    pub sample_rate: u32,

    /// Bits per sample
    #[arg(short, long = "bits", default_value_t = AudioParams::default().bits_per_sample)]
    pub bits_per_sample: u16,
}

impl ParamArgs {
    pub fn to_params(&self) -> AudioParams {
        AudioParams::new(self.channels, self.sample_rate, self.bits_per_sample)
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wrap file(s) in a WAV container
    Convert {
        /// Input file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output path (single input only; defaults to the input with a .wav extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        params: ParamArgs,

        /// Overwrite existing output files
        #[arg(long)]
        force: bool,
    },

    /// Show the header of WAV file(s)
    Info {
        /// WAV file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Also show file size, modification time and duration
        #[arg(short, long)]
        detailed: bool,
    },

    /// Recover the raw payload from a WAV file
    Extract {
        /// WAV file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the payload
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Convert every file in a directory matching a pattern
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: PathBuf,

        /// File pattern (e.g., "*.bin"); searched recursively when it has no wildcard
        #[arg(short, long)]
        pattern: String,

        #[command(flatten)]
        params: ParamArgs,

        /// Overwrite existing output files
        #[arg(long)]
        force: bool,
    },
}

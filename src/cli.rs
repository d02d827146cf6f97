use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabloforge")]
#[command(author, version, about = "Extract Tablo DVR recordings into MP4 files")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Concatenate a recording's segments into <output-dir>/<id>.mp4
    Extract {
        /// Recording id (the folder name under <mount>/rec)
        #[arg(required = true)]
        recording_id: String,

        /// Mount point of the recorder drive
        #[arg(short, long)]
        mount: Option<PathBuf>,

        /// Directory receiving the MP4 file
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Concurrent ffprobe runs (0 = one per CPU, 1 = sequential)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Print the concat manifest without running ffmpeg
        #[arg(long)]
        dry_run: bool,

        /// Keep the manifest if ffmpeg fails
        #[arg(long)]
        keep_manifest: bool,
    },

    /// List recordings on the recorder drive
    List {
        /// Mount point of the recorder drive
        #[arg(short, long)]
        mount: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Probe a segment and display its duration
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

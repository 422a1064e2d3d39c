use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medialoop")]
#[command(author, version, about = "Loop, join and length-match media files")]
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
    /// Loop an MP3 to an exact duration in minutes
    LoopDuration {
        /// Source MP3
        source: PathBuf,

        /// Destination MP3
        dest: PathBuf,

        /// Target duration in minutes (may be fractional)
        #[arg(short, long)]
        minutes: f64,
    },

    /// Repeat an MP3 a fixed number of times
    LoopTimes {
        /// Source MP3
        source: PathBuf,

        /// Destination MP3
        dest: PathBuf,

        /// Number of repetitions
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
        repetitions: u32,
    },

    /// Trim or loop a video to an audio track's length and replace its audio
    SyncVideo {
        /// Source video
        video: PathBuf,

        /// Audio track to lay over the video
        audio: PathBuf,

        /// Destination video (container follows the extension)
        dest: PathBuf,
    },

    /// Join several tracks from one directory into a single MP3
    Concat {
        /// Directory holding the tracks
        #[arg(short, long, default_value = ".")]
        base: PathBuf,

        /// Destination MP3
        #[arg(short, long)]
        output: PathBuf,

        /// Track file names, in playback order
        #[arg(required = true)]
        names: Vec<PathBuf>,
    },

    /// Probe a media file and display its duration and streams
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

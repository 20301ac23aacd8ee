//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Settings;
use crate::pipeline::TargetFormat;

#[derive(Debug, Parser)]
#[command(
    name = "mobilize",
    version = env!("CARGO_PKG_VERSION"),
    about = "Send audio files to a mobile device",
    after_help = "Copy audio files from one tree to another. When copying, files can be \
                  excluded based on their audio tags. FLAC files are converted to either \
                  ogg or mp3 on the way."
)]
pub struct Cli {
    /// Preferred encoding for FLAC files [default: ogg]
    #[arg(short, long, value_enum)]
    pub preferred: Option<TargetFormat>,

    /// Quality setting for the encoder [default: 6.0]
    #[arg(short, long, allow_negative_numbers = true)]
    pub quality: Option<f32>,

    /// File holding exclusion rules
    #[arg(short = 'x', long, value_name = "EXCLUDE FILE")]
    pub exclude: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Don't change anything; implies --verbose
    #[arg(short, long)]
    pub dry_run: bool,

    /// Show what is being done (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Destination root directory
    #[arg(short, long, value_name = "OUTPUT DIRECTORY")]
    pub output: PathBuf,

    /// Source root directories
    #[arg(required = true, value_name = "SRC")]
    pub sources: Vec<PathBuf>,
}

impl Cli {
    /// Verbosity level, with dry runs always at least `-v`.
    pub fn verbosity(&self) -> u8 {
        if self.dry_run {
            self.verbose.max(1)
        } else {
            self.verbose
        }
    }

    /// Let flags given on the command line win over loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(preferred) = self.preferred {
            settings.transcode.preferred = preferred;
        }
        if let Some(quality) = self.quality {
            settings.transcode.quality = quality;
        }
        if let Some(exclude) = &self.exclude {
            settings.filter.exclude_file = Some(exclude.clone());
        }
        if let Some(jobs) = self.jobs {
            settings.workers.count = Some(jobs.max(1));
        }
    }
}

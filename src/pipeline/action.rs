use std::path::PathBuf;
use std::process::ExitStatus;

use serde::Deserialize;
use thiserror::Error;

use crate::media::MediaItem;

/// Lossy format FLAC files are converted to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TargetFormat {
    #[serde(alias = "vorbis")]
    Ogg,
    Mp3,
}

impl TargetFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Ogg => "ogg",
            TargetFormat::Mp3 => "mp3",
        }
    }

    /// External tools the encoder needs on `PATH`.
    pub fn required_tools(self) -> &'static [&'static str] {
        match self {
            TargetFormat::Ogg => &["oggenc"],
            TargetFormat::Mp3 => &["flac", "lame"],
        }
    }
}

/// Encoder quality, already fitted to the target format's scale.
///
/// Ogg Vorbis takes -1.0 to 10.0; LAME's VBR scale is the integers 0 to 9.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quality(f32);

impl Quality {
    pub fn for_format(format: TargetFormat, requested: f32) -> Self {
        let requested = if requested.is_nan() { 6.0 } else { requested };
        let value = match format {
            TargetFormat::Ogg => requested.clamp(-1.0, 10.0),
            TargetFormat::Mp3 => requested.round().clamp(0.0, 9.0),
        };
        Self(value)
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Unit of work handed to the worker pool.
#[derive(Debug, Clone)]
pub enum Action {
    Convert {
        item: MediaItem,
        format: TargetFormat,
        quality: Quality,
    },
    Copy(MediaItem),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Convert,
    Copy,
}

impl Action {
    pub fn item(&self) -> &MediaItem {
        match self {
            Action::Convert { item, .. } | Action::Copy(item) => item,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Convert { .. } => ActionKind::Convert,
            Action::Copy(_) => ActionKind::Copy,
        }
    }

    /// Where the result lands; conversions swap the file extension.
    pub fn output_path(&self) -> PathBuf {
        match self {
            Action::Convert { item, format, .. } => {
                item.destination.with_extension(format.extension())
            }
            Action::Copy(item) => item.destination.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Performs the conversion or copy an action describes.
pub trait ActionExecutor: Send + Sync {
    fn execute(&self, action: &Action) -> Result<(), ExecError>;
}

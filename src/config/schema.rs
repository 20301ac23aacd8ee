use std::path::PathBuf;

use serde::Deserialize;

use crate::pipeline::TargetFormat;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mobilize/config.toml` or `~/.config/mobilize/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `MOBILIZE__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub transcode: TranscodeSettings,
    pub workers: WorkerSettings,
    pub filter: FilterSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscodeSettings {
    /// Format FLAC files are converted to.
    pub preferred: TargetFormat,
    /// Encoder quality. Clamped to -1..10 for ogg, rounded to 0..9 for mp3.
    pub quality: f32,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            preferred: TargetFormat::Ogg,
            quality: 6.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Number of worker threads. Defaults to twice the CPU count.
    pub count: Option<usize>,
    /// Maximum queued actions before submission blocks. Unbounded when unset.
    pub queue_bound: Option<usize>,
}

impl WorkerSettings {
    pub fn effective_count(&self) -> usize {
        self.count.unwrap_or_else(|| num_cpus::get() * 2)
    }
}

/// What to do when the exclusion rules fail to compile.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompileErrorPolicy {
    /// Report the error and stop before touching anything.
    #[default]
    Abort,
    /// Report the error and carry on without filtering.
    #[serde(alias = "ignore")]
    Disable,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// File holding exclusion rules.
    pub exclude_file: Option<PathBuf>,
    pub on_compile_error: CompileErrorPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether to follow symlinks while walking source trees.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Remove destination directories left without audio after a run.
    pub prune: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: false,
            prune: true,
        }
    }
}

use std::path::PathBuf;

use super::tags::TagMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioKind {
    Flac,
    Vorbis,
    Opus,
    Mp3,
}

impl AudioKind {
    pub fn is_lossless(self) -> bool {
        matches!(self, AudioKind::Flac)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

/// What a discovered file turned out to be.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Audio(AudioKind),
    Image(ImageKind),
    Other,
}

/// Audio properties and raw tags read from one file.
#[derive(Debug, Clone, Default)]
pub struct AudioInfo {
    pub tags: Vec<(String, String)>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u8>,
}

/// A file on its way through the pipeline.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: MediaKind,
    /// Only present for audio.
    pub tags: Option<TagMap>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u8>,
}

impl MediaItem {
    pub fn new(source: PathBuf, destination: PathBuf, kind: MediaKind) -> Self {
        Self {
            source,
            destination,
            kind,
            tags: None,
            sample_rate: None,
            bit_depth: None,
        }
    }

    pub fn with_audio(mut self, info: AudioInfo) -> Self {
        self.tags = Some(TagMap::build(info.tags));
        self.sample_rate = info.sample_rate;
        self.bit_depth = info.bit_depth;
        self
    }

    pub fn is_audio(&self) -> bool {
        matches!(self.kind, MediaKind::Audio(_))
    }

    /// `Artist/Album/Title` when tagged, otherwise the file name.
    pub fn pretty(&self) -> String {
        let file_name = || {
            self.source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.source.display().to_string())
        };

        let Some(tags) = &self.tags else {
            return file_name();
        };

        let parts: Vec<&str> = ["artist", "album", "title"]
            .iter()
            .map_while(|key| tags.get_raw(key).filter(|v| !v.trim().is_empty()))
            .collect();

        match parts.len() {
            3 => parts.join("/"),
            0 => file_name(),
            _ => format!("{}/{}", parts.join("/"), file_name()),
        }
    }
}

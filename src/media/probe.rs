use std::fs::File;
use std::io::Read;
use std::path::Path;

use lofty::file::FileType;
use lofty::prelude::*;
use lofty::probe::Probe;

use super::model::{AudioInfo, AudioKind, ImageKind, MediaKind};

/// Decides what kind of media a file holds.
pub trait TypeClassifier {
    fn classify(&self, path: &Path) -> MediaKind;
}

/// Reads embedded tags and audio properties. `None` means "not audio".
pub trait TagExtractor {
    fn extract(&self, path: &Path) -> Option<AudioInfo>;
}

/// Classifier and tag reader backed by `lofty`, with magic-byte sniffing
/// for cover art images.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl TypeClassifier for LoftyProbe {
    fn classify(&self, path: &Path) -> MediaKind {
        let audio = Probe::open(path)
            .ok()
            .and_then(|probe| probe.guess_file_type().ok())
            .and_then(|probe| probe.file_type())
            .and_then(audio_kind);

        match audio {
            Some(kind) => MediaKind::Audio(kind),
            None => sniff_image(path)
                .map(MediaKind::Image)
                .unwrap_or(MediaKind::Other),
        }
    }
}

impl TagExtractor for LoftyProbe {
    fn extract(&self, path: &Path) -> Option<AudioInfo> {
        let tagged = lofty::read_from_path(path).ok()?;
        let properties = tagged.properties();

        let mut tags = Vec::new();
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            for item in tag.items() {
                let key = match item.key() {
                    ItemKey::TrackTitle => "title",
                    ItemKey::TrackArtist => "artist",
                    ItemKey::AlbumTitle => "album",
                    ItemKey::Genre => "genre",
                    ItemKey::Comment => "comment",
                    ItemKey::RecordingDate => "date",
                    ItemKey::TrackNumber => "tracknumber",
                    _ => continue,
                };
                if let Some(value) = item.value().text() {
                    tags.push((key.to_string(), value.to_string()));
                }
            }
        }

        Some(AudioInfo {
            tags,
            sample_rate: properties.sample_rate(),
            bit_depth: properties.bit_depth(),
        })
    }
}

fn audio_kind(file_type: FileType) -> Option<AudioKind> {
    match file_type {
        FileType::Flac => Some(AudioKind::Flac),
        FileType::Vorbis => Some(AudioKind::Vorbis),
        FileType::Opus => Some(AudioKind::Opus),
        FileType::Mpeg => Some(AudioKind::Mp3),
        _ => None,
    }
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

fn sniff_image(path: &Path) -> Option<ImageKind> {
    let mut header = [0u8; 8];
    let mut file = File::open(path).ok()?;
    let n = file.read(&mut header).ok()?;
    image_kind(&header[..n])
}

fn image_kind(header: &[u8]) -> Option<ImageKind> {
    if header.starts_with(JPEG_MAGIC) {
        Some(ImageKind::Jpeg)
    } else if header.starts_with(PNG_MAGIC) {
        Some(ImageKind::Png)
    } else {
        None
    }
}

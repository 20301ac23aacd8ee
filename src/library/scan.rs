use std::fs;
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::DiscoveredFile;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// NFKC-fold a directory name, then keep its letters, digits and spaces,
/// minus trailing blanks.
pub fn normalize_component(name: &str) -> String {
    let kept: String = name
        .nfkc()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    kept.trim_end().to_string()
}

/// Directory under `output` that mirrors the source root `source`.
///
/// The source is resolved first, so `.` and `..` are named after the
/// directory they point at. A root whose name normalizes to nothing maps
/// to `output` itself.
pub fn destination_root(source: &Path, output: &Path) -> PathBuf {
    let resolved = fs::canonicalize(source)
        .or_else(|_| std::path::absolute(source))
        .unwrap_or_else(|_| source.to_path_buf());
    let name = resolved
        .file_name()
        .map(|n| normalize_component(&n.to_string_lossy()))
        .unwrap_or_default();

    if name.is_empty() {
        output.to_path_buf()
    } else {
        output.join(name)
    }
}

/// Destination for a file at `relative` (to its source root).
///
/// Directory components are normalized; the file name is kept as-is.
pub fn destination_for(dest_root: &Path, relative: &Path) -> PathBuf {
    let mut destination = dest_root.to_path_buf();
    if let Some(parent) = relative.parent() {
        for component in parent.iter() {
            let name = normalize_component(&component.to_string_lossy());
            if !name.is_empty() {
                destination.push(name);
            }
        }
    }
    if let Some(file_name) = relative.file_name() {
        destination.push(file_name);
    }
    destination
}

/// Walk `source` and pair every file with where it should land under `output`.
///
/// Order is whatever the filesystem walk yields.
pub fn discover<'a>(
    source: &'a Path,
    output: &Path,
    settings: &'a LibrarySettings,
) -> impl Iterator<Item = DiscoveredFile> + 'a {
    let dest_root = destination_root(source, output);

    WalkDir::new(source)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(move |e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Cannot read {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let relative = entry.path().strip_prefix(source).ok()?;
            let destination = destination_for(&dest_root, relative);
            Some(DiscoveredFile {
                source: entry.path().to_path_buf(),
                destination,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn normalize_component_drops_punctuation_and_trailing_space() {
        assert_eq!(normalize_component("AC/DC"), "ACDC");
        assert_eq!(normalize_component("Live! (1999) "), "Live 1999");
        assert_eq!(normalize_component("Björk: Début"), "Björk Début");
        assert_eq!(normalize_component("???"), "");
    }

    #[test]
    fn normalize_component_folds_compatibility_characters() {
        assert_eq!(normalize_component("Ｂｅｓｔ ｏｆ²"), "Best of2");
        assert_eq!(normalize_component("ﬁve"), "five");
    }

    #[test]
    fn destination_root_resolves_relative_sources() {
        let cwd = std::env::current_dir().unwrap();
        let cwd_name = normalize_component(&cwd.file_name().unwrap().to_string_lossy());
        assert_eq!(
            destination_root(Path::new("."), Path::new("/player")),
            Path::new("/player").join(cwd_name)
        );

        let dir = tempdir().unwrap();
        let music = dir.path().join("Music");
        fs::create_dir_all(music.join("Sub")).unwrap();
        assert_eq!(
            destination_root(&music.join("Sub").join(".."), Path::new("/player")),
            PathBuf::from("/player/Music")
        );
    }

    #[test]
    fn destination_root_uses_normalized_source_name() {
        assert_eq!(
            destination_root(Path::new("/music/Rock & Roll/"), Path::new("/player")),
            PathBuf::from("/player/Rock  Roll")
        );
        assert_eq!(
            destination_root(Path::new("/"), Path::new("/player")),
            PathBuf::from("/player")
        );
    }

    #[test]
    fn destination_for_normalizes_directories_but_not_file_names() {
        assert_eq!(
            destination_for(Path::new("/player/music"), Path::new("Artist!/Album?/01 - Song.flac")),
            PathBuf::from("/player/music/Artist/Album/01 - Song.flac")
        );
        assert_eq!(
            destination_for(Path::new("/player/music"), Path::new("cover.jpg")),
            PathBuf::from("/player/music/cover.jpg")
        );
    }

    #[test]
    fn discover_skips_hidden_entries_by_default() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("music");
        fs::create_dir_all(src.join("Album").join(".cache")).unwrap();
        fs::write(src.join("Album").join("song.flac"), b"x").unwrap();
        fs::write(src.join("Album").join(".DS_Store"), b"x").unwrap();
        fs::write(src.join("Album").join(".cache").join("junk"), b"x").unwrap();

        let out = dir.path().join("out");
        let settings = LibrarySettings::default();
        let found: Vec<DiscoveredFile> = discover(&src, &out, &settings).collect();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source, src.join("Album").join("song.flac"));
        assert_eq!(
            found[0].destination,
            out.join("music").join("Album").join("song.flac")
        );
    }

    #[test]
    fn discover_includes_hidden_when_asked() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("music");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join(".hidden.flac"), b"x").unwrap();
        fs::write(src.join("visible.flac"), b"x").unwrap();

        let settings = LibrarySettings {
            include_hidden: true,
            ..LibrarySettings::default()
        };
        let found = discover(&src, dir.path(), &settings).count();
        assert_eq!(found, 2);
    }
}

//! Runs actions by calling the external encoders or copying bytes.

use std::fs;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::media::{MediaItem, TagName};
use crate::pipeline::{Action, ActionExecutor, ExecError, Quality, TargetFormat};

/// Executes actions with `oggenc`, `flac | lame` and plain file copies.
///
/// In dry-run mode it only logs what it would do.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandExecutor {
    pub dry_run: bool,
}

impl CommandExecutor {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

impl ActionExecutor for CommandExecutor {
    fn execute(&self, action: &Action) -> Result<(), ExecError> {
        let output = action.output_path();

        match action {
            Action::Convert {
                item,
                format,
                quality,
            } => {
                tracing::info!("Converting {} to {}", item.pretty(), format.extension());
                if self.dry_run {
                    return Ok(());
                }
                create_parent(&output)?;
                match format {
                    TargetFormat::Ogg => encode_ogg(item, *quality, &output),
                    TargetFormat::Mp3 => encode_mp3(item, *quality, &output),
                }
            }
            Action::Copy(item) => {
                tracing::info!("Copying {}", item.pretty());
                if self.dry_run {
                    return Ok(());
                }
                create_parent(&output)?;
                fs::copy(&item.source, &output)?;
                Ok(())
            }
        }
    }
}

fn create_parent(path: &Path) -> Result<(), ExecError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn spawn(tool: &'static str, command: &mut Command) -> Result<Child, ExecError> {
    command
        .spawn()
        .map_err(|source| ExecError::Spawn { tool, source })
}

fn wait(tool: &'static str, mut child: Child) -> Result<(), ExecError> {
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Failed { tool, status })
    }
}

fn encode_ogg(item: &MediaItem, quality: Quality, output: &Path) -> Result<(), ExecError> {
    let child = spawn(
        "oggenc",
        Command::new("oggenc")
            .arg("--quiet")
            .arg("-q")
            .arg(format!("{:.3}", quality.value()))
            .arg("-o")
            .arg(output)
            .arg(&item.source)
            .stdout(Stdio::null())
            .stderr(Stdio::null()),
    )?;
    wait("oggenc", child)
}

fn encode_mp3(item: &MediaItem, quality: Quality, output: &Path) -> Result<(), ExecError> {
    let mut decoder = spawn(
        "flac",
        Command::new("flac")
            .args(["-c", "-d"])
            .arg(&item.source)
            .stdout(Stdio::piped())
            .stderr(Stdio::null()),
    )?;
    let Some(pcm) = decoder.stdout.take() else {
        reap(decoder);
        return Err(ExecError::Io(std::io::Error::other("flac produced no output pipe")));
    };

    let encoder = match spawn(
        "lame",
        Command::new("lame")
            .args(["--quiet", "--add-id3v2", "-V"])
            .arg(format!("{}", quality.value() as u8))
            .args(id3_args(item))
            .arg("-")
            .arg(output)
            .stdin(Stdio::from(pcm))
            .stderr(Stdio::null()),
    ) {
        Ok(encoder) => encoder,
        Err(e) => {
            reap(decoder);
            return Err(e);
        }
    };

    let encoded = wait("lame", encoder);
    let decoded = wait("flac", decoder);
    encoded.and(decoded)
}

/// Stop a child whose consumer never started, so it does not linger.
fn reap(mut child: Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// `lame` tag flags for whatever tags the item carries.
fn id3_args(item: &MediaItem) -> Vec<String> {
    let Some(tags) = &item.tags else {
        return Vec::new();
    };

    let fields = [
        ("--tt", tags.get_raw("title")),
        ("--ta", tags.get(TagName::Artist)),
        ("--tl", tags.get(TagName::Album)),
        ("--ty", tags.get(TagName::Year)),
        ("--tc", tags.get(TagName::Comment)),
        ("--tn", tags.get_raw("tracknumber")),
        ("--tg", tags.get(TagName::Genre)),
    ];

    fields
        .into_iter()
        .filter_map(|(flag, value)| value.map(|v| [flag.to_string(), v.to_string()]))
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{AudioInfo, AudioKind, ImageKind, MediaKind};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn tagged(tags: &[(&str, &str)]) -> MediaItem {
        MediaItem::new(
            PathBuf::from("/src/a.flac"),
            PathBuf::from("/out/a.flac"),
            MediaKind::Audio(AudioKind::Flac),
        )
        .with_audio(AudioInfo {
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..AudioInfo::default()
        })
    }

    #[test]
    fn id3_args_follow_fixed_order_and_skip_missing() {
        let item = tagged(&[
            ("GENRE", "Jazz"),
            ("TITLE", "So What"),
            ("DATE", "1959"),
            ("ARTIST", "Miles Davis"),
        ]);
        assert_eq!(
            id3_args(&item),
            vec![
                "--tt", "So What", "--ta", "Miles Davis", "--ty", "1959", "--tg", "Jazz"
            ]
        );
    }

    #[test]
    fn id3_args_empty_without_tags() {
        let item = MediaItem::new(
            PathBuf::from("/src/c.jpg"),
            PathBuf::from("/out/c.jpg"),
            MediaKind::Image(ImageKind::Jpeg),
        );
        assert!(id3_args(&item).is_empty());
    }

    #[test]
    fn copy_creates_destination_directories() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("cover.jpg");
        std::fs::write(&source, b"jpeg bytes").unwrap();
        let destination = dir.path().join("out").join("Artist").join("cover.jpg");

        let item = MediaItem::new(
            source,
            destination.clone(),
            MediaKind::Image(ImageKind::Jpeg),
        );
        CommandExecutor::new(false)
            .execute(&Action::Copy(item))
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("cover.jpg");
        std::fs::write(&source, b"jpeg bytes").unwrap();
        let destination = dir.path().join("out").join("cover.jpg");

        let executor = CommandExecutor::new(true);
        let copy = Action::Copy(MediaItem::new(
            source.clone(),
            destination.clone(),
            MediaKind::Image(ImageKind::Jpeg),
        ));
        let convert = Action::Convert {
            item: MediaItem::new(source, destination, MediaKind::Audio(AudioKind::Flac)),
            format: TargetFormat::Ogg,
            quality: Quality::for_format(TargetFormat::Ogg, 6.0),
        };

        executor.execute(&copy).unwrap();
        executor.execute(&convert).unwrap();
        assert!(!dir.path().join("out").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reap_kills_and_collects_the_child() {
        let started = std::time::Instant::now();
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();

        reap(child);

        assert!(started.elapsed() < std::time::Duration::from_secs(10));
        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }

    #[test]
    fn copy_of_missing_source_is_an_error() {
        let dir = tempdir().unwrap();
        let item = MediaItem::new(
            dir.path().join("missing.jpg"),
            dir.path().join("out.jpg"),
            MediaKind::Image(ImageKind::Jpeg),
        );
        let err = CommandExecutor::new(false)
            .execute(&Action::Copy(item))
            .unwrap_err();
        assert!(matches!(err, ExecError::Io(_)));
    }
}

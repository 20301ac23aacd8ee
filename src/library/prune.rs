use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::media::{MediaKind, TypeClassifier};

/// Remove directories under `root` (and `root` itself) that end up with
/// no audio file and no subdirectory. Returns how many were removed.
///
/// Works bottom-up, so a directory emptied by pruning its children is
/// pruned as well.
pub fn prune(root: &Path, classifier: &dyn TypeClassifier) -> std::io::Result<usize> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in WalkDir::new(root)
        .contents_first(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
    {
        let dir = entry.path();
        if keeps_directory(dir, classifier)? {
            continue;
        }
        tracing::debug!("Pruning {}", dir.display());
        fs::remove_dir_all(dir)?;
        removed += 1;
    }
    Ok(removed)
}

fn keeps_directory(dir: &Path, classifier: &dyn TypeClassifier) -> std::io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() || matches!(classifier.classify(&path), MediaKind::Audio(_)) {
            return Ok(true);
        }
    }
    Ok(false)
}

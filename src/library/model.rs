use std::path::PathBuf;

/// A file found under a source root, paired with its destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

//! Media classification and the normalized tag model.
//!
//! `TagMap` is the view the exclusion rules are evaluated against;
//! `MediaItem` carries one discovered file through the pipeline.

mod model;
mod probe;
mod tags;

pub use model::{AudioInfo, AudioKind, ImageKind, MediaItem, MediaKind};
pub use probe::{LoftyProbe, TagExtractor, TypeClassifier};
pub use tags::{TagMap, TagName};

#[cfg(test)]
mod tests;

use std::fmt;

use crate::filter::{Expression, evaluate};
use crate::library::DiscoveredFile;
use crate::media::{MediaItem, MediaKind, TagExtractor, TypeClassifier};

use super::action::{Action, ActionKind, Quality, TargetFormat};
use super::pool::{PoolClosed, PoolReport, WorkerPool};

/// Run-time choices the classify stage needs.
#[derive(Debug, Copy, Clone)]
pub struct DispatchOptions {
    pub format: TargetFormat,
    pub quality: Quality,
}

/// What happened to one discovered file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Neither audio nor image, or unreadable audio.
    Skipped,
    /// Matched the exclusion rules.
    Excluded,
    Submitted(ActionKind),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub discovered: usize,
    pub skipped: usize,
    pub excluded: usize,
    pub converted: usize,
    pub copied: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dispatch: DispatchStats,
    pub pool: PoolReport,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.dispatch;
        write!(
            f,
            "{} found, {} converted, {} copied, {} excluded, {} skipped",
            d.discovered, d.converted, d.copied, d.excluded, d.skipped
        )?;
        if self.pool.failed > 0 || self.pool.panicked > 0 {
            write!(f, ", {} failed", self.pool.failed + self.pool.panicked)?;
        }
        Ok(())
    }
}

/// Pushes discovered files through filter, classify and submit.
///
/// Everything up to submission happens on the caller's thread; the pool
/// runs the actions. Call [`Dispatcher::finish`] to wait for them.
pub struct Dispatcher<'a> {
    filter: Option<&'a Expression>,
    classifier: &'a dyn TypeClassifier,
    extractor: &'a dyn TagExtractor,
    options: DispatchOptions,
    pool: WorkerPool,
    stats: DispatchStats,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        filter: Option<&'a Expression>,
        classifier: &'a dyn TypeClassifier,
        extractor: &'a dyn TagExtractor,
        options: DispatchOptions,
        pool: WorkerPool,
    ) -> Self {
        Self {
            filter,
            classifier,
            extractor,
            options,
            pool,
            stats: DispatchStats::default(),
        }
    }

    pub fn dispatch(&mut self, file: DiscoveredFile) -> Result<Outcome, PoolClosed> {
        self.stats.discovered += 1;

        let Some(item) = self.identify(file) else {
            self.stats.skipped += 1;
            return Ok(Outcome::Skipped);
        };

        let Some(item) = filter_stage(item, self.filter) else {
            self.stats.excluded += 1;
            return Ok(Outcome::Excluded);
        };

        let action = classify_stage(item, self.options);
        let kind = action.kind();
        self.pool.submit(action)?;

        match kind {
            ActionKind::Convert => self.stats.converted += 1,
            ActionKind::Copy => self.stats.copied += 1,
        }
        Ok(Outcome::Submitted(kind))
    }

    /// Wait for every submitted action, then report.
    pub fn finish(self) -> RunSummary {
        RunSummary {
            dispatch: self.stats,
            pool: self.pool.drain(),
        }
    }

    /// Classify the file and, for audio, read its tags.
    fn identify(&self, file: DiscoveredFile) -> Option<MediaItem> {
        let kind = self.classifier.classify(&file.source);
        let item = MediaItem::new(file.source, file.destination, kind);

        match kind {
            MediaKind::Other => {
                tracing::debug!("Skipping {}", item.source.display());
                None
            }
            MediaKind::Image(_) => Some(item),
            MediaKind::Audio(_) => match self.extractor.extract(&item.source) {
                Some(info) => {
                    let item = item.with_audio(info);
                    tracing::trace!(
                        sample_rate = ?item.sample_rate,
                        bit_depth = ?item.bit_depth,
                        "Read tags from {}",
                        item.source.display()
                    );
                    Some(item)
                }
                None => {
                    tracing::debug!("Cannot read tags from {}", item.source.display());
                    None
                }
            },
        }
    }
}

/// Drop audio whose tags match the exclusion rules.
pub(crate) fn filter_stage(item: MediaItem, filter: Option<&Expression>) -> Option<MediaItem> {
    let excluded = match (filter, &item.tags) {
        (Some(expr), Some(tags)) if item.is_audio() => evaluate(expr, tags),
        _ => false,
    };

    if excluded {
        tracing::info!("Excluding {}", item.pretty());
        None
    } else {
        Some(item)
    }
}

pub(crate) fn classify_stage(item: MediaItem, options: DispatchOptions) -> Action {
    match item.kind {
        MediaKind::Audio(kind) if kind.is_lossless() => Action::Convert {
            item,
            format: options.format,
            quality: options.quality,
        },
        _ => Action::Copy(item),
    }
}

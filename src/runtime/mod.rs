use std::path::Path;
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::{CompileErrorPolicy, FilterSettings};
use crate::error::MobilizeError;
use crate::executor::CommandExecutor;
use crate::filter::{self, Expression};
use crate::library;
use crate::media::{LoftyProbe, TypeClassifier};
use crate::pipeline::{DispatchOptions, Dispatcher, Quality, WorkerPool};

mod logging;
mod preflight;
mod settings;


pub fn run(cli: Cli) -> anyhow::Result<()> {
    logging::setup_logging(cli.verbosity());

    let mut settings = settings::load_settings();
    cli.apply(&mut settings);

    preflight::check_destination(&cli.output)?;
    if !cli.dry_run {
        preflight::check_tools(settings.transcode.preferred)?;
    }

    // Rule problems surface here, before any file is touched.
    let rules = load_rules(&settings.filter)?;

    let format = settings.transcode.preferred;
    let options = DispatchOptions {
        format,
        quality: Quality::for_format(format, settings.transcode.quality),
    };
    let executor = Arc::new(CommandExecutor::new(cli.dry_run));
    let pool = WorkerPool::new(
        settings.workers.effective_count(),
        settings.workers.queue_bound,
        executor,
    )
    .map_err(MobilizeError::Pool)?;

    tracing::info!("Mobilizing your music with {} workers...", pool.size());

    let probe = LoftyProbe;
    let mut dispatcher = Dispatcher::new(rules.as_ref(), &probe, &probe, options, pool);

    for source in &cli.sources {
        if !source.is_dir() {
            tracing::warn!("{} is not a directory, skipping", source.display());
            continue;
        }
        for file in library::discover(source, &cli.output, &settings.library) {
            dispatcher.dispatch(file).map_err(MobilizeError::from)?;
        }
    }

    let summary = dispatcher.finish();

    if !cli.dry_run && settings.library.prune {
        for source in &cli.sources {
            prune_destination(source, &cli.output, &probe);
        }
    }

    tracing::info!("Your music has been mobilized! {summary}");
    Ok(())
}

/// Prune the mirror of one source root. Returns how many directories went.
///
/// Never prunes `output` itself: it may hold data that did not come from us.
fn prune_destination(source: &Path, output: &Path, classifier: &dyn TypeClassifier) -> usize {
    let root = library::destination_root(source, output);
    if root.as_path() == output {
        tracing::warn!(
            "{} has no usable name, not pruning {}",
            source.display(),
            output.display()
        );
        return 0;
    }

    match library::prune(&root, classifier) {
        Ok(removed) => {
            if removed > 0 {
                tracing::debug!("Pruned {removed} directories under {}", root.display());
            }
            removed
        }
        Err(e) => {
            tracing::warn!("Could not prune {}: {e}", root.display());
            0
        }
    }
}

/// Compile the exclusion rules, applying the configured failure policy.
fn load_rules(filter_settings: &FilterSettings) -> Result<Option<Expression>, MobilizeError> {
    let Some(path) = &filter_settings.exclude_file else {
        return Ok(None);
    };

    match filter::load(path) {
        Ok(rules) => Ok(Some(rules)),
        Err(e) => match filter_settings.on_compile_error {
            CompileErrorPolicy::Abort => Err(e.into()),
            CompileErrorPolicy::Disable => {
                tracing::error!("{e}; continuing without exclusion rules");
                Ok(None)
            }
        },
    }
}

//! Errors that stop a run before or during dispatch.

use std::path::PathBuf;

use thiserror::Error;

use crate::filter::FilterError;
use crate::pipeline::PoolClosed;

#[derive(Debug, Error)]
pub enum MobilizeError {
    #[error("destination {} does not exist", .0.display())]
    MissingDestination(PathBuf),

    #[error("destination {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot find `{0}` on PATH")]
    MissingTool(&'static str),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("cannot start worker pool: {0}")]
    Pool(#[source] std::io::Error),

    #[error(transparent)]
    PoolClosed(#[from] PoolClosed),
}

//! Dispatch pipeline: filter → classify → submit, then drain.
//!
//! Files are identified and filtered on the caller's thread. Survivors
//! become [`Action`]s that a [`WorkerPool`] runs independently; the pool
//! keeps submission order but not completion order.

mod action;
mod dispatch;
mod pool;

pub use action::{Action, ActionExecutor, ActionKind, ExecError, Quality, TargetFormat};
pub use dispatch::{DispatchOptions, DispatchStats, Dispatcher, Outcome, RunSummary};
pub use pool::{PoolClosed, WorkerPool};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use thiserror::Error;

use super::action::{Action, ActionExecutor};

#[derive(Debug, Error)]
#[error("worker pool has shut down")]
pub struct PoolClosed;

#[derive(Debug, Default)]
struct Counters {
    completed: AtomicUsize,
    failed: AtomicUsize,
}

/// Totals gathered once every worker has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub completed: usize,
    pub failed: usize,
    /// Workers that died instead of returning.
    pub panicked: usize,
}

/// Fixed set of threads running actions off a shared queue.
///
/// The queue is unbounded unless `queue_bound` is given, in which case
/// [`WorkerPool::submit`] blocks while the queue is full.
pub struct WorkerPool {
    sender: Sender<Action>,
    workers: Vec<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl WorkerPool {
    pub fn new(
        size: usize,
        queue_bound: Option<usize>,
        executor: Arc<dyn ActionExecutor>,
    ) -> std::io::Result<Self> {
        let (sender, receiver) = match queue_bound {
            Some(bound) => channel::bounded(bound),
            None => channel::unbounded(),
        };
        let counters = Arc::new(Counters::default());

        let workers = (0..size.max(1))
            .map(|worker_id| {
                let receiver = receiver.clone();
                let executor = executor.clone();
                let counters = counters.clone();
                thread::Builder::new()
                    .name(format!("mobilize-worker-{worker_id}"))
                    .spawn(move || worker_loop(worker_id, receiver, executor, counters))
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        Ok(Self {
            sender,
            workers,
            counters,
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue an action; returns as soon as it is enqueued.
    pub fn submit(&self, action: Action) -> Result<(), PoolClosed> {
        self.sender.send(action).map_err(|_| PoolClosed)
    }

    /// Close the queue and wait for every queued action to finish.
    pub fn drain(self) -> PoolReport {
        let Self {
            sender,
            workers,
            counters,
        } = self;
        drop(sender);

        let mut panicked = 0;
        for handle in workers {
            if handle.join().is_err() {
                panicked += 1;
            }
        }

        PoolReport {
            completed: counters.completed.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
            panicked,
        }
    }
}

fn worker_loop(
    worker_id: usize,
    receiver: Receiver<Action>,
    executor: Arc<dyn ActionExecutor>,
    counters: Arc<Counters>,
) {
    while let Ok(action) = receiver.recv() {
        match executor.execute(&action) {
            Ok(()) => {
                counters.completed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(worker_id, "failed on {}: {e}", action.item().pretty());
            }
        }
    }
    tracing::trace!(worker_id, "worker finished");
}

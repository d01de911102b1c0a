// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task queue drained by a tokio worker task

use super::QueueError;
use ep_core::{Task, TaskQueue};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

/// Queue whose tasks run, in submission order, on a spawned tokio task.
///
/// On a multi-threaded runtime tasks may run on another worker thread than
/// the one that submitted them. The proxy tolerates that, but listeners that
/// assume a single thread should use a current-thread runtime.
#[derive(Clone)]
pub struct TokioQueue {
    tx: mpsc::UnboundedSender<Task>,
}

impl TokioQueue {
    /// Spawn the worker on the current runtime
    pub fn spawn() -> Result<Self, QueueError> {
        let handle = Handle::try_current().map_err(|_| QueueError::NoRuntime)?;
        Ok(Self::spawn_on(&handle))
    }

    /// Spawn the worker on the given runtime
    pub fn spawn_on(handle: &Handle) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Task>();
        handle.spawn(async move {
            while let Some(task) = rx.recv().await {
                task();
            }
            tracing::debug!("task queue worker stopped");
        });
        Self { tx }
    }

    /// Wait until every task submitted before this call has run
    pub async fn flush(&self) -> Result<(), QueueError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Box::new(move || {
                let _ = done_tx.send(());
            }))
            .map_err(|_| QueueError::Closed)?;
        done_rx.await.map_err(|_| QueueError::Closed)
    }
}

impl TaskQueue for TokioQueue {
    fn submit(&self, task: Task) {
        if self.tx.send(task).is_err() {
            tracing::warn!("task queue worker has stopped, dropping task");
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;

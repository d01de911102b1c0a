// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced queue wrapper for observability of deferred work

use ep_core::{Task, TaskQueue};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Wrapper that logs every submission and every task run of any `TaskQueue`
pub struct TracedQueue<Q> {
    inner: Q,
    name: Arc<str>,
    submitted: AtomicU64,
}

impl<Q> TracedQueue<Q> {
    pub fn new(name: &str, inner: Q) -> Self {
        Self {
            inner,
            name: Arc::from(name),
            submitted: AtomicU64::new(0),
        }
    }

    /// Number of tasks submitted through this wrapper
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &Q {
        &self.inner
    }
}

impl<Q: TaskQueue> TaskQueue for TracedQueue<Q> {
    fn submit(&self, task: Task) {
        let seq = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
        let span = tracing::debug_span!("queue.submit", queue = %self.name, seq);
        let _guard = span.enter();
        tracing::debug!("deferred");

        let name = Arc::clone(&self.name);
        self.inner.submit(Box::new(move || {
            let span = tracing::debug_span!("queue.run", queue = %name, seq);
            let _guard = span.enter();

            let start = std::time::Instant::now();
            task();
            tracing::debug!(elapsed_us = start.elapsed().as_micros() as u64, "ran");
        }));
    }

    fn run_pending(&self) -> usize {
        let ran = self.inner.run_pending();
        if ran > 0 {
            tracing::debug!(queue = %self.name, ran, "drained");
        }
        ran
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred task execution
//!
//! `emit_later` and `done_later` hand continuations to a `TaskQueue`. The
//! proxy only relies on two properties: `submit` never blocks, and tasks run
//! in submission order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A continuation scheduled for a later turn
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// FIFO executor for deferred work
pub trait TaskQueue: Send + Sync {
    /// Schedule a task without running it
    fn submit(&self, task: Task);

    /// Run queued tasks on the caller's thread and return how many ran.
    ///
    /// Queues that drain themselves return 0.
    fn run_pending(&self) -> usize {
        0
    }
}

impl<Q: TaskQueue + ?Sized> TaskQueue for Arc<Q> {
    fn submit(&self, task: Task) {
        (**self).submit(task)
    }

    fn run_pending(&self) -> usize {
        (**self).run_pending()
    }
}

/// Queue drained explicitly by its owner.
///
/// This is the default queue of an `EventProxy`: deferred firings happen when
/// the host calls `run_pending`, which also runs tasks submitted while draining.
#[derive(Clone, Default)]
pub struct ManualQueue {
    tasks: Arc<Mutex<VecDeque<Task>>>,
}

impl ManualQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run
    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskQueue for ManualQueue {
    fn submit(&self, task: Task) {
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(task);
    }

    fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // The lock is released before the task runs so it can submit more work
            let next = self
                .tasks
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

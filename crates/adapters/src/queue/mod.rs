// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime-backed task queues

mod runtime;

pub use runtime::TokioQueue;

use thiserror::Error;

/// Errors from queue setup and flushing
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("no tokio runtime is running")]
    NoRuntime,
    #[error("task queue worker has stopped")]
    Closed,
}

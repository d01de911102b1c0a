// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Task queue adapters for deferred event firing

pub mod queue;
pub mod traced;

pub use queue::{QueueError, TokioQueue};
pub use traced::TracedQueue;

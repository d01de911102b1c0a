// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ep-core: in-process event proxy
//!
//! This crate provides:
//! - `EventProxy` - bind listeners to named events and trigger them synchronously
//! - Combinators that wait on several events at once (`all`, `tail`, `after`, `any`, `not`)
//! - Error-first completion adapters (`done`, `group`, `fail`) that funnel failures
//!   into the reserved `"error"` event
//! - `TaskQueue` - the seam used for deferred firing (`emit_later`, `done_later`)

pub mod config;
pub mod error;
pub mod listener;
pub mod payload;
pub mod queue;

mod combinators;
mod completion;
mod proxy;
mod registry;

#[cfg(test)]
mod test_support;

pub use combinators::AnyFired;
pub use completion::{Completion, DoneHandler, Transform};
pub use config::ProxyConfig;
pub use error::{ConfigError, ProxyError};
pub use listener::{Listener, ListenerId};
pub use payload::is_truthy;
pub use proxy::{EventProxy, WeakProxy, ALL_EVENT, ERROR_EVENT};
pub use queue::{ManualQueue, Task, TaskQueue};

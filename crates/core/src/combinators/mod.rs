// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Combinators that wait on compound conditions over several events
//!
//! Each combinator is built from plain bindings plus one wildcard listener
//! that re-checks its exit condition whenever anything fires. They hold no
//! state outside the proxy's own maps and the closures they bind.

mod after;
mod any;
mod assign;

pub use any::AnyFired;

use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

/// Collect event names into an ordered set; the first occurrence of a name wins
pub(crate) fn event_set<I, S>(events: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = Vec::new();
    for name in events {
        let name = name.into();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Split a wildcard firing into the real event name and its arguments
pub(crate) fn wildcard_args(args: &[Value]) -> Option<(&str, &[Value])> {
    match args.split_first() {
        Some((Value::String(name), rest)) => Some((name.as_str(), rest)),
        _ => None,
    }
}

/// Poison-tolerant lock for combinator-local state
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `after` and its ordered fan-in helper `group`

use super::{lock, wildcard_args};
use crate::completion::{Completion, Transform};
use crate::listener::Listener;
use crate::payload::{first_or_null, split_error_first};
use crate::proxy::{AfterState, EventProxy, ALL_EVENT};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Name of the internal signal `group` completions fire for `event`
pub(crate) fn group_key(event: &str) -> String {
    format!("{}_group", event)
}

struct Countdown<F> {
    remaining: usize,
    fired: Vec<Value>,
    callback: Option<F>,
}

impl EventProxy {
    /// Call `callback` once `event` has fired `times` times, with the
    /// payloads in firing order.
    ///
    /// `times == 0` calls `callback(vec![])` before returning and binds
    /// nothing. Completions created by `group(event)` also count down; when
    /// one of them is the last to arrive the callback receives the grouped
    /// results in `group` call order instead.
    pub fn after(
        &self,
        event: &str,
        times: usize,
        callback: impl FnOnce(Vec<Value>) + Send + 'static,
    ) -> &Self {
        if times == 0 {
            callback(Vec::new());
            return self;
        }

        let group = group_key(event);
        self.lock().after.insert(group.clone(), AfterState::default());
        tracing::debug!(label = self.label(), event, times, "after listener");

        let weak = self.downgrade();
        let event = event.to_string();
        let countdown = Mutex::new(Countdown {
            remaining: times,
            fired: Vec::new(),
            callback: Some(callback),
        });
        let id = self.lock().registry.next_id();

        let watcher = Listener::new(move |args| {
            let Some((name, rest)) = wildcard_args(args) else {
                return;
            };
            let is_group = name == group;
            if name != event && !is_group {
                return;
            }

            let finished = {
                let mut countdown = lock(&countdown);
                if countdown.callback.is_none() {
                    return;
                }
                if !is_group {
                    countdown.fired.push(first_or_null(rest));
                }
                countdown.remaining = countdown.remaining.saturating_sub(1);
                if countdown.remaining > 0 {
                    return;
                }
                (countdown.callback.take(), std::mem::take(&mut countdown.fired))
            };

            let Some(proxy) = weak.upgrade() else {
                return;
            };
            proxy.unbind_id(ALL_EVENT, id);
            // The fan-in buffer is released on either path
            let grouped = proxy.take_group_results(&group);
            let results = if is_group { grouped } else { finished.1 };
            tracing::debug!(label = proxy.label(), event = %event, "after count reached");
            if let Some(callback) = finished.0 {
                callback(results);
            }
        });
        self.lock().registry.push(ALL_EVENT, id, watcher);
        self
    }

    /// Error-first completion feeding a pending `after(event, ..)`.
    ///
    /// Each call reserves the next result slot, so results are ordered by
    /// `group` call order no matter when the completions arrive. Success
    /// stores the first success value; an error goes to `"error"` and leaves
    /// the slot empty.
    pub fn group(&self, event: &str) -> Completion {
        self.group_inner(event, None)
    }

    /// `group`, storing `transform(success values)` instead of the first value
    pub fn group_map(
        &self,
        event: &str,
        transform: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Completion {
        self.group_inner(event, Some(Arc::new(transform)))
    }

    fn group_inner(&self, event: &str, transform: Option<Transform>) -> Completion {
        let key = group_key(event);
        let index = {
            let mut state = self.lock();
            let pending = state.after.contains_key(&key);
            let slot = state.after.entry(key.clone()).or_default();
            let index = slot.next_index;
            slot.next_index += 1;
            if !pending {
                tracing::warn!(label = self.label(), event, "group called without a pending after");
            }
            index
        };

        let proxy = self.clone();
        Completion::new(move |args| {
            let (error, success) = split_error_first(args);
            if error.is_some() {
                proxy.throw(args);
                return;
            }
            let result = match &transform {
                Some(transform) => transform(success),
                None => first_or_null(success),
            };
            if proxy.store_group_result(&key, index, result) {
                proxy.trigger(&key, &[Value::from(index)]);
            }
        })
    }

    fn store_group_result(&self, key: &str, index: usize, result: Value) -> bool {
        let mut state = self.lock();
        match state.after.get_mut(key) {
            Some(slot) => {
                if slot.results.len() <= index {
                    slot.results.resize(index + 1, None);
                }
                slot.results[index] = Some(result);
                true
            }
            None => {
                tracing::debug!(label = self.label(), key, index, "dropping late group result");
                false
            }
        }
    }

    fn take_group_results(&self, key: &str) -> Vec<Value> {
        self.lock()
            .after
            .remove(key)
            .map(|slot| {
                slot.results
                    .into_iter()
                    .map(|r| r.unwrap_or(Value::Null))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "after_tests.rs"]
mod tests;

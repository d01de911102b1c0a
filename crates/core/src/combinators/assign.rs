// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `all` and `tail`: wait until every named event has fired

use super::{event_set, lock, wildcard_args};
use crate::listener::Listener;
use crate::payload::first_or_null;
use crate::proxy::{EventProxy, ALL_EVENT};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Fire once, then tear down
    Once,
    /// Keep firing with the latest data on every later firing
    Always,
}

impl EventProxy {
    /// New proxy with `all(events, callback)` already wired.
    ///
    /// With no event names this is a plain `EventProxy::new()`.
    pub fn create<I, S>(events: I, callback: impl FnOnce(Vec<Value>) + Send + 'static) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let proxy = Self::new();
        let events = event_set(events);
        if !events.is_empty() {
            proxy.all(events, callback);
        }
        proxy
    }

    /// New proxy with `fail(on_error)` and `all(events, callback)` wired.
    ///
    /// With no event names nothing is wired.
    pub fn create_with_fail<I, S>(
        events: I,
        callback: impl FnOnce(Vec<Value>) + Send + 'static,
        on_error: impl FnOnce(&[Value]) + Send + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let proxy = Self::new();
        let events = event_set(events);
        if !events.is_empty() {
            proxy.fail(on_error).all(events, callback);
        }
        proxy
    }

    /// Call `callback` once every event in `events` has fired at least once.
    ///
    /// The callback receives each event's payload in the order the names
    /// were given. Later firings have no effect. Duplicate names are
    /// collapsed, and an empty name list binds nothing. Alias: `assign`.
    pub fn all<I, S>(&self, events: I, callback: impl FnOnce(Vec<Value>) + Send + 'static) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let callback = Mutex::new(Some(callback));
        self.watch_all(event_set(events), Mode::Once, move |data| {
            let callback = lock(&callback).take();
            if let Some(callback) = callback {
                callback(data);
            }
        });
        self
    }

    pub fn assign<I, S>(&self, events: I, callback: impl FnOnce(Vec<Value>) + Send + 'static) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all(events, callback)
    }

    /// Like `all`, but stays armed: after the first call, every firing of a
    /// named event calls `callback` again with the latest payload of every
    /// name. Runs until the proxy is unbound. Aliases: `assign_all`, `assign_always`.
    pub fn tail<I, S>(&self, events: I, callback: impl Fn(&[Value]) + Send + Sync + 'static) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watch_all(event_set(events), Mode::Always, move |data| callback(data.as_slice()));
        self
    }

    pub fn assign_all<I, S>(&self, events: I, callback: impl Fn(&[Value]) + Send + Sync + 'static) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tail(events, callback)
    }

    pub fn assign_always<I, S>(
        &self,
        events: I,
        callback: impl Fn(&[Value]) + Send + Sync + 'static,
    ) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tail(events, callback)
    }

    fn watch_all(
        &self,
        events: Vec<String>,
        mode: Mode,
        on_ready: impl Fn(Vec<Value>) + Send + Sync + 'static,
    ) {
        if events.is_empty() {
            tracing::warn!(label = self.label(), ?mode, "combinator needs at least one event");
            return;
        }
        tracing::debug!(label = self.label(), ?events, ?mode, "assign listener");

        let weak = self.downgrade();
        let ready: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));

        for event in &events {
            let weak = weak.clone();
            let ready = Arc::clone(&ready);
            let key = event.clone();
            let recorder = Listener::new(move |args| {
                if let Some(proxy) = weak.upgrade() {
                    proxy.record_fired(&key, first_or_null(args));
                }
                lock(&ready).insert(key.clone());
            });
            match mode {
                Mode::Once => self.once_with_id(event, recorder),
                Mode::Always => self.bind_with_id(event, recorder, false),
            };
        }

        // Reserved up front so the checker can unbind itself
        let checker_id = self.lock().registry.next_id();
        let checker = Listener::new(move |args| {
            let Some((name, _)) = wildcard_args(args) else {
                return;
            };
            {
                let ready = lock(&ready);
                if ready.len() < events.len() || !ready.contains(name) {
                    return;
                }
            }
            let Some(proxy) = weak.upgrade() else {
                return;
            };
            let data: Vec<Value> = {
                let state = proxy.lock();
                events
                    .iter()
                    .map(|e| state.fired.get(e).cloned().unwrap_or(Value::Null))
                    .collect()
            };
            if mode == Mode::Once {
                proxy.unbind_id(ALL_EVENT, checker_id);
            }
            tracing::debug!(label = proxy.label(), ?events, "all events fired");
            on_ready(data);
        });
        self.lock().registry.push(ALL_EVENT, checker_id, checker);
    }
}

#[cfg(test)]
#[path = "assign_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event proxy: listener registration and synchronous dispatch
//!
//! `EventProxy` is a cheap handle; clones share the same listeners. The state
//! lock is never held while a listener runs, so listeners may bind, unbind
//! and trigger on the proxy that is calling them.
//!
//! A listener that panics is not caught. The panic unwinds out of `trigger`
//! and the remaining listeners of that pass do not run.

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::listener::{Listener, ListenerId};
use crate::queue::{ManualQueue, TaskQueue};
use crate::registry::Registry;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Reserved wildcard event. Listeners bound here see every firing, with the
/// real event name prepended to the arguments. It cannot be triggered directly.
pub const ALL_EVENT: &str = "__all__";

/// Reserved event used by `done`, `group`, `fail` and `throw`
pub const ERROR_EVENT: &str = "error";

/// Ordered fan-in buffer shared by `after` and `group`
#[derive(Debug, Default)]
pub(crate) struct AfterState {
    pub next_index: usize,
    pub results: Vec<Option<Value>>,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    pub registry: Registry,
    /// Latest payload recorded by a combinator, per event
    pub fired: HashMap<String, Value>,
    /// Fan-in buffers keyed by `<event>_group`
    pub after: HashMap<String, AfterState>,
}

/// Handle to a set of event bindings
#[derive(Clone)]
pub struct EventProxy {
    state: Arc<Mutex<State>>,
    queue: Arc<dyn TaskQueue>,
    config: Arc<ProxyConfig>,
}

/// Non-owning handle, used by listeners that need to reach back into their proxy
#[derive(Clone)]
pub struct WeakProxy {
    state: Weak<Mutex<State>>,
    queue: Arc<dyn TaskQueue>,
    config: Arc<ProxyConfig>,
}

impl WeakProxy {
    pub fn upgrade(&self) -> Option<EventProxy> {
        self.state.upgrade().map(|state| EventProxy {
            state,
            queue: Arc::clone(&self.queue),
            config: Arc::clone(&self.config),
        })
    }
}

impl EventProxy {
    /// Proxy with default config and a `ManualQueue` for deferred work
    pub fn new() -> Self {
        Self::with_config(ProxyConfig::default())
    }

    pub fn with_config(config: ProxyConfig) -> Self {
        Self::with_parts(Arc::new(ManualQueue::new()), config)
    }

    pub fn with_queue(queue: Arc<dyn TaskQueue>) -> Self {
        Self::with_parts(queue, ProxyConfig::default())
    }

    pub fn with_parts(queue: Arc<dyn TaskQueue>, config: ProxyConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            queue,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub(crate) fn queue(&self) -> &Arc<dyn TaskQueue> {
        &self.queue
    }

    pub fn downgrade(&self) -> WeakProxy {
        WeakProxy {
            state: Arc::downgrade(&self.state),
            queue: Arc::clone(&self.queue),
            config: Arc::clone(&self.config),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn label(&self) -> &str {
        &self.config.label
    }

    // ---------------------------------------------------------------------
    // Registry
    // ---------------------------------------------------------------------

    /// Append `listener` to the bindings of `event`.
    ///
    /// Aliases: `bind`, `on`, `subscribe`.
    pub fn add_listener(&self, event: &str, listener: Listener) -> &Self {
        self.bind_with_id(event, listener, false);
        self
    }

    pub fn bind(&self, event: &str, listener: Listener) -> &Self {
        self.add_listener(event, listener)
    }

    pub fn on(&self, event: &str, listener: Listener) -> &Self {
        self.add_listener(event, listener)
    }

    pub fn subscribe(&self, event: &str, listener: Listener) -> &Self {
        self.add_listener(event, listener)
    }

    /// Bind `listener` ahead of every existing binding of `event`
    pub fn headbind(&self, event: &str, listener: Listener) -> &Self {
        self.bind_with_id(event, listener, true);
        self
    }

    /// Bind to the wildcard channel
    pub fn bind_for_all(&self, listener: Listener) -> &Self {
        self.add_listener(ALL_EVENT, listener)
    }

    pub fn unbind_for_all(&self, listener: &Listener) -> &Self {
        self.remove_listener(Some(ALL_EVENT), Some(listener))
    }

    pub(crate) fn bind_with_id(&self, event: &str, listener: Listener, head: bool) -> ListenerId {
        let mut state = self.lock();
        let id = state.registry.next_id();
        if head {
            state.registry.push_front(event, id, listener);
        } else {
            state.registry.push(event, id, listener);
        }
        tracing::debug!(label = self.label(), event, head, "add listener");
        id
    }

    /// Remove bindings.
    ///
    /// - no event: every binding of every event, wildcard included
    /// - event only: every binding of that event
    /// - event and listener: the first live binding holding that listener
    ///
    /// Alias: `unbind`.
    pub fn remove_listener(&self, event: Option<&str>, listener: Option<&Listener>) -> &Self {
        let mut state = self.lock();
        match (event, listener) {
            (None, _) => {
                tracing::debug!(label = self.label(), "remove all listeners");
                state.registry.clear();
            }
            (Some(event), None) => {
                tracing::debug!(label = self.label(), event, "remove all listeners of event");
                state.registry.clear_event(event);
            }
            (Some(event), Some(listener)) => {
                if state.registry.remove_listener(event, listener) {
                    tracing::debug!(label = self.label(), event, "remove listener");
                }
            }
        }
        self
    }

    pub fn unbind(&self, event: Option<&str>, listener: Option<&Listener>) -> &Self {
        self.remove_listener(event, listener)
    }

    /// Remove every binding of `event`
    pub fn remove_all_listeners(&self, event: &str) -> &Self {
        self.remove_listener(Some(event), None)
    }

    /// Remove every binding of every event
    pub fn unbind_all(&self) -> &Self {
        self.remove_listener(None, None)
    }

    pub(crate) fn unbind_id(&self, event: &str, id: ListenerId) -> bool {
        self.lock().registry.remove_id(event, id)
    }

    // ---------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------

    /// Fire `event`, then the wildcard channel.
    ///
    /// Triggering `ALL_EVENT` is rejected with a warning. Aliases: `emit`, `fire`.
    pub fn trigger(&self, event: &str, args: &[Value]) -> &Self {
        if let Err(e) = self.try_trigger(event, args) {
            tracing::warn!(label = self.label(), error = %e, "trigger ignored");
        }
        self
    }

    pub fn emit(&self, event: &str, args: &[Value]) -> &Self {
        self.trigger(event, args)
    }

    pub fn fire(&self, event: &str, args: &[Value]) -> &Self {
        self.trigger(event, args)
    }

    /// `trigger`, reporting a reserved event name as an error
    pub fn try_trigger(&self, event: &str, args: &[Value]) -> Result<&Self, ProxyError> {
        if event == ALL_EVENT {
            return Err(ProxyError::ReservedEvent(event.to_string()));
        }
        self.dispatch(event, args);
        Ok(self)
    }

    fn dispatch(&self, event: &str, args: &[Value]) {
        let specific = self.lock().registry.snapshot(event);
        tracing::debug!(
            label = self.label(),
            event,
            listeners = specific.len(),
            "trigger"
        );
        if self.config.log_payloads {
            tracing::trace!(label = self.label(), event, args = ?args, "payload");
        }

        for slot in &specific {
            // An earlier listener in this pass may have unbound this one
            if slot.is_alive() {
                slot.listener.call(args);
            }
        }

        // Taken after the specific pass so wildcard bindings made by those
        // listeners see this firing
        let wildcard = self.lock().registry.snapshot(ALL_EVENT);
        if !wildcard.is_empty() {
            let mut tagged = Vec::with_capacity(args.len() + 1);
            tagged.push(Value::String(event.to_string()));
            tagged.extend_from_slice(args);
            for slot in &wildcard {
                if slot.is_alive() {
                    slot.listener.call(&tagged);
                }
            }
        }

        if event == ERROR_EVENT
            && specific.is_empty()
            && wildcard.is_empty()
            && self.config.warn_unhandled_errors
        {
            tracing::warn!(label = self.label(), args = ?args, "unhandled error event");
        }
    }

    /// Bind `listener` so that it runs at most once.
    ///
    /// The binding is removed before the listener runs, and a re-entrant
    /// firing of the same event while it runs does not call it again.
    pub fn once(&self, event: &str, listener: Listener) -> &Self {
        self.once_with_id(event, listener);
        self
    }

    pub(crate) fn once_with_id(&self, event: &str, listener: Listener) -> ListenerId {
        let id = self.lock().registry.next_id();
        let weak = self.downgrade();
        let name = event.to_string();
        let spent = AtomicBool::new(false);
        let wrapper = Listener::new(move |args| {
            if spent.swap(true, Ordering::SeqCst) {
                return;
            }
            if let Some(proxy) = weak.upgrade() {
                proxy.unbind_id(&name, id);
            }
            listener.call(args);
        });
        self.lock().registry.push(event, id, wrapper);
        tracing::debug!(label = self.label(), event, "add one-shot listener");
        id
    }

    /// Schedule `trigger(event, args)` on the task queue
    pub fn emit_later(&self, event: &str, args: Vec<Value>) -> &Self {
        let weak = self.downgrade();
        let event = event.to_string();
        tracing::debug!(label = self.label(), event = %event, "defer trigger");
        self.queue.submit(Box::new(move || {
            if let Some(proxy) = weak.upgrade() {
                proxy.trigger(&event, &args);
            }
        }));
        self
    }

    /// Drain the task queue on this thread (no-op for self-draining queues)
    pub fn run_pending(&self) -> usize {
        self.queue.run_pending()
    }

    /// Bind `listener`, then trigger `event` with `data` so it sees that firing.
    ///
    /// Alias: `asap`.
    pub fn immediate(&self, event: &str, listener: Listener, data: Value) -> &Self {
        self.add_listener(event, listener);
        self.trigger(event, &[data])
    }

    pub fn asap(&self, event: &str, listener: Listener, data: Value) -> &Self {
        self.immediate(event, listener, data)
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    /// Number of live bindings for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().registry.live_count(event)
    }

    /// Events that currently have at least one live binding, sorted
    pub fn event_names(&self) -> Vec<String> {
        self.lock().registry.events()
    }

    /// Latest payload a combinator recorded for `event`
    pub fn fired_data(&self, event: &str) -> Option<Value> {
        self.lock().fired.get(event).cloned()
    }

    pub(crate) fn record_fired(&self, event: &str, data: Value) {
        self.lock().fired.insert(event.to_string(), data);
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self, event: &str) -> usize {
        self.lock().registry.slot_count(event)
    }
}

impl Default for EventProxy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventProxy")
            .field("label", &self.config.label)
            .field("events", &self.event_names())
            .finish()
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;

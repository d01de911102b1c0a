// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error-first completion adapters
//!
//! A `Completion` is handed to code that reports back with an error-first
//! argument list: `[error, value...]`. A set error slot is forwarded, with
//! every argument, to the reserved `"error"` event. Otherwise the success
//! values are routed to an event or a listener.

use crate::listener::Listener;
use crate::payload::{first_or_null, split_error_first};
use crate::proxy::{EventProxy, ERROR_EVENT};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Maps success values to the single payload that gets delivered
pub type Transform = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Error-first callback produced by `done`, `done_later` and `group`
#[derive(Clone)]
pub struct Completion(Arc<dyn Fn(&[Value]) + Send + Sync>);

impl Completion {
    pub(crate) fn new(callback: impl Fn(&[Value]) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Report with a raw error-first argument list
    pub fn call(&self, args: &[Value]) {
        (self.0)(args)
    }

    /// Report success with the given values
    pub fn ok(&self, values: impl IntoIterator<Item = Value>) {
        let args: Vec<Value> = std::iter::once(Value::Null).chain(values).collect();
        self.call(&args)
    }

    /// Report failure. A falsy error (`null`, `""`, `0`, `false`) counts as success.
    pub fn err(&self, error: impl Into<Value>) {
        self.call(&[error.into()])
    }

    /// Report a Rust result: `Ok` is serialized as the single success value,
    /// `Err` is reported by its message.
    pub fn finish<T: Serialize, E: fmt::Display>(&self, result: Result<T, E>) {
        match result.map(serde_json::to_value) {
            Ok(Ok(value)) => self.ok([value]),
            Ok(Err(e)) => self.err(e.to_string()),
            Err(e) => self.err(e.to_string()),
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Completion")
    }
}

/// Destination of a successful `done` completion
#[derive(Clone, Debug)]
pub enum DoneHandler {
    /// Re-emit the success values as this event
    Event(String),
    /// Call the listener with the success values
    Callback(Listener),
}

impl From<&str> for DoneHandler {
    fn from(event: &str) -> Self {
        DoneHandler::Event(event.to_string())
    }
}

impl From<String> for DoneHandler {
    fn from(event: String) -> Self {
        DoneHandler::Event(event)
    }
}

impl From<Listener> for DoneHandler {
    fn from(listener: Listener) -> Self {
        DoneHandler::Callback(listener)
    }
}

impl EventProxy {
    /// Error-first adapter.
    ///
    /// On success an event handler re-emits the success values unchanged; a
    /// listener handler is called with them (with exactly one value, `null`
    /// if none, when at most one was supplied).
    pub fn done(&self, handler: impl Into<DoneHandler>) -> Completion {
        self.done_inner(handler.into(), None)
    }

    /// Error-first adapter that re-emits `event` with `transform(success values)`
    pub fn done_map(
        &self,
        event: &str,
        transform: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Completion {
        self.done_inner(DoneHandler::Event(event.to_string()), Some(Arc::new(transform)))
    }

    /// `done`, with the adapter's work deferred to the task queue
    pub fn done_later(&self, handler: impl Into<DoneHandler>) -> Completion {
        self.defer(self.done(handler))
    }

    /// `done_map`, with the adapter's work deferred to the task queue
    pub fn done_later_map(
        &self,
        event: &str,
        transform: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Completion {
        self.defer(self.done_map(event, transform))
    }

    // Completions hold the proxy strongly; they are never stored in the registry
    fn done_inner(&self, handler: DoneHandler, transform: Option<Transform>) -> Completion {
        let proxy = self.clone();
        Completion::new(move |args| {
            let (error, success) = split_error_first(args);
            if error.is_some() {
                proxy.throw(args);
                return;
            }

            match &handler {
                DoneHandler::Event(event) => {
                    match &transform {
                        Some(transform) => proxy.trigger(event, &[transform(success)]),
                        None => proxy.trigger(event, success),
                    };
                }
                DoneHandler::Callback(listener) => {
                    if success.len() <= 1 {
                        listener.call(&[first_or_null(success)]);
                    } else {
                        listener.call(success);
                    }
                }
            }
        })
    }

    /// Wrap a completion so each call is replayed later with the same arguments
    pub(crate) fn defer(&self, inner: Completion) -> Completion {
        let queue = Arc::clone(self.queue());
        Completion::new(move |args| {
            let inner = inner.clone();
            let args = args.to_vec();
            queue.submit(Box::new(move || inner.call(&args)));
        })
    }

    /// Install the error handler.
    ///
    /// On the first `"error"` firing every binding on the proxy is removed,
    /// then `callback` receives the full error argument list.
    pub fn fail(&self, callback: impl FnOnce(&[Value]) + Send + 'static) -> &Self {
        let weak = self.downgrade();
        let callback = Mutex::new(Some(callback));
        self.once(
            ERROR_EVENT,
            Listener::new(move |args| {
                if let Some(proxy) = weak.upgrade() {
                    tracing::debug!(label = proxy.label(), "error captured, unbinding all");
                    proxy.unbind_all();
                }
                let callback = callback.lock().unwrap_or_else(|e| e.into_inner()).take();
                if let Some(callback) = callback {
                    callback(args);
                }
            }),
        )
    }

    /// Trigger the reserved `"error"` event
    pub fn throw(&self, args: &[Value]) -> &Self {
        self.trigger(ERROR_EVENT, args)
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `any` and `not`

use super::{event_set, lock, wildcard_args};
use crate::error::ProxyError;
use crate::listener::{Listener, ListenerId};
use crate::payload::first_or_null;
use crate::proxy::EventProxy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Prefix of the synthetic event an `any` relays onto. Reserved.
const ANY_PREFIX: &str = "__any__:";

/// Which event satisfied an `any`, and what it carried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyFired {
    pub data: Value,
    pub event_name: String,
}

impl AnyFired {
    fn from_args(args: &[Value]) -> Result<Self, ProxyError> {
        Ok(serde_json::from_value(first_or_null(args))?)
    }
}

impl EventProxy {
    /// Call `callback` once, on the first firing of any event in `events`.
    ///
    /// Each named event is relayed onto a synthetic event (`__any__:` plus
    /// the names joined with `_`) that carries `{data, eventName}`; a one-shot binding on that
    /// event invokes the callback and removes the relays.
    pub fn any<I, S>(&self, events: I, callback: impl FnOnce(AnyFired) + Send + 'static) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let events = event_set(events);
        if events.is_empty() {
            tracing::warn!(label = self.label(), "any needs at least one event");
            return self;
        }
        let synthetic = format!("{ANY_PREFIX}{}", events.join("_"));
        tracing::debug!(label = self.label(), ?events, "any listener");

        let weak = self.downgrade();
        let relays: Arc<Mutex<Vec<(String, ListenerId)>>> = Arc::new(Mutex::new(Vec::new()));
        let callback = Mutex::new(Some(callback));

        let relays_done = Arc::clone(&relays);
        let weak_done = weak.clone();
        self.once(
            &synthetic,
            Listener::new(move |args| {
                let bound = std::mem::take(&mut *lock(&relays_done));
                if let Some(proxy) = weak_done.upgrade() {
                    for (event, id) in bound {
                        proxy.unbind_id(&event, id);
                    }
                }
                match AnyFired::from_args(args) {
                    Ok(fired) => {
                        let callback = lock(&callback).take();
                        if let Some(callback) = callback {
                            callback(fired);
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "malformed any payload"),
                }
            }),
        );

        for event in events {
            let weak = weak.clone();
            let synthetic = synthetic.clone();
            let key = event.clone();
            let relay = Listener::new(move |args| {
                if let Some(proxy) = weak.upgrade() {
                    let fired = json!({ "data": first_or_null(args), "eventName": key });
                    proxy.trigger(&synthetic, &[fired]);
                }
            });
            let id = self.bind_with_id(&event, relay, false);
            lock(&relays).push((event, id));
        }
        self
    }

    /// Call `callback` with the arguments of every firing except those of `event`.
    ///
    /// Stays bound until the proxy is unbound.
    pub fn not(&self, event: &str, callback: Listener) -> &Self {
        let except = event.to_string();
        tracing::debug!(label = self.label(), event, "not listener");
        self.bind_for_all(Listener::new(move |args| {
            if let Some((name, rest)) = wildcard_args(args) {
                if name != except {
                    callback.call(rest);
                }
            }
        }))
    }
}

#[cfg(test)]
#[path = "any_tests.rs"]
mod tests;

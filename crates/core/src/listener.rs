// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener handles

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Callback = dyn Fn(&[Value]) + Send + Sync;

/// A callback that can be bound to an event.
///
/// Clones share identity: keep a clone around to unbind the listener later.
/// Binding the same listener twice makes it fire twice.
#[derive(Clone)]
pub struct Listener(Arc<Callback>);

impl Listener {
    pub fn new(callback: impl Fn(&[Value]) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invoke the callback directly
    pub fn call(&self, args: &[Value]) {
        (self.0)(args)
    }

    /// Whether both handles refer to the same callback
    pub fn same(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Registry-assigned identity of a single binding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

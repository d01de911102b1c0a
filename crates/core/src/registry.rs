// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-event listener lists
//!
//! Removal never splices a list. It flips the slot's liveness flag and the
//! dead slot is compacted on the next dispatch pass over that list, so a pass
//! that already snapshotted the list keeps valid indices and skips the slot.

use crate::listener::{Listener, ListenerId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One binding of a listener to an event
#[derive(Clone, Debug)]
pub(crate) struct Slot {
    pub id: ListenerId,
    pub listener: Listener,
    alive: Arc<AtomicBool>,
}

impl Slot {
    fn new(id: ListenerId, listener: Listener) -> Self {
        Self {
            id,
            listener,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the slot dead, returning whether it was alive before
    fn kill(&self) -> bool {
        self.alive.swap(false, Ordering::SeqCst)
    }
}

/// Ordered listener lists keyed by event name
#[derive(Debug, Default)]
pub(crate) struct Registry {
    lists: HashMap<String, Vec<Slot>>,
    next_id: u64,
}

impl Registry {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id for a binding that is inserted later
    pub fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    /// Append a binding so it fires after existing ones
    pub fn push(&mut self, event: &str, id: ListenerId, listener: Listener) {
        self.lists
            .entry(event.to_string())
            .or_default()
            .push(Slot::new(id, listener));
    }

    /// Prepend a binding so it fires before existing ones
    pub fn push_front(&mut self, event: &str, id: ListenerId, listener: Listener) {
        self.lists
            .entry(event.to_string())
            .or_default()
            .insert(0, Slot::new(id, listener));
    }

    /// Kill every binding of every event and forget all lists
    pub fn clear(&mut self) {
        for slot in self.lists.values().flatten() {
            slot.kill();
        }
        self.lists.clear();
    }

    /// Kill every binding of one event, leaving an empty list behind
    pub fn clear_event(&mut self, event: &str) {
        if let Some(list) = self.lists.get_mut(event) {
            for slot in list.iter() {
                slot.kill();
            }
            list.clear();
        }
    }

    /// Kill the first live binding of `listener` on `event`
    pub fn remove_listener(&mut self, event: &str, listener: &Listener) -> bool {
        self.lists
            .get(event)
            .and_then(|list| {
                list.iter()
                    .find(|slot| slot.is_alive() && slot.listener.same(listener))
            })
            .is_some_and(Slot::kill)
    }

    /// Kill the binding with the given id
    pub fn remove_id(&mut self, event: &str, id: ListenerId) -> bool {
        self.lists
            .get(event)
            .and_then(|list| list.iter().find(|slot| slot.id == id))
            .is_some_and(Slot::kill)
    }

    /// Compact dead slots and return the live bindings in firing order
    pub fn snapshot(&mut self, event: &str) -> Vec<Slot> {
        match self.lists.get_mut(event) {
            Some(list) => {
                list.retain(Slot::is_alive);
                list.clone()
            }
            None => Vec::new(),
        }
    }

    /// Number of live bindings for an event
    pub fn live_count(&self, event: &str) -> usize {
        self.lists
            .get(event)
            .map_or(0, |list| list.iter().filter(|s| s.is_alive()).count())
    }

    /// Number of slots for an event, dead ones included
    #[cfg(test)]
    pub fn slot_count(&self, event: &str) -> usize {
        self.lists.get(event).map_or(0, Vec::len)
    }

    /// Names of events with at least one live binding, sorted
    pub fn events(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .lists
            .iter()
            .filter(|(_, list)| list.iter().any(Slot::is_alive))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

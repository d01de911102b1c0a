// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for unit tests

use crate::listener::Listener;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Records the arguments of every call made through its listeners
#[derive(Clone, Default)]
pub(crate) struct Calls {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> Listener {
        let calls = Arc::clone(&self.calls);
        Listener::new(move |args| calls.lock().unwrap().push(args.to_vec()))
    }

    /// Record a call from a combinator callback
    pub fn push(&self, args: Vec<Value>) {
        self.calls.lock().unwrap().push(args);
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<Vec<Value>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Vec<Value>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

/// Shared log of labels, for asserting cross-listener ordering
#[derive(Clone, Default)]
pub(crate) struct Order {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self, label: &str) -> Listener {
        let entries = Arc::clone(&self.entries);
        let label = label.to_string();
        Listener::new(move |_| entries.lock().unwrap().push(label.clone()))
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.logs.lock().unwrap()).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a trace-level subscriber and return everything it logged
pub(crate) fn with_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers for event arguments
//!
//! Every firing carries an ordered list of opaque `serde_json::Value`s.

use serde_json::Value;

/// Whether a value counts as a set error slot in an error-first argument list.
///
/// `null`, `false`, `0`, `NaN` and `""` are unset; everything else is set.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First argument of a firing, or `null` when none was passed
pub(crate) fn first_or_null(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Null)
}

/// Split an error-first argument list into its error slot and success values
pub(crate) fn split_error_first(args: &[Value]) -> (Option<&Value>, &[Value]) {
    match args.split_first() {
        Some((err, rest)) => (Some(err).filter(|e| is_truthy(e)), rest),
        None => (None, &[]),
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;

//! `fail` and `throw` specs

use crate::prelude::*;

#[test]
fn fail_unbinds_everything_then_reports_the_error() {
    let ep = EventProxy::new();
    let later = Recorder::new();
    let errors = Recorder::new();
    ep.bind("progress", later.listener());
    ep.fail(errors.each());

    ep.throw(&[json!("timeout"), json!(30)]);
    ep.trigger("progress", &[json!(50)]);

    errors.saw(vec![vec![json!("timeout"), json!(30)]]);
    later.never_called();
    assert!(ep.event_names().is_empty());
}

#[test]
fn fail_handles_only_the_first_error() {
    let ep = EventProxy::new();
    let errors = Recorder::new();
    ep.fail(errors.each());

    ep.throw(&[json!("first")]).throw(&[json!("second")]);

    errors.saw(vec![vec![json!("first")]]);
}

#[test]
fn fail_cancels_a_pending_group() {
    let ep = EventProxy::new();
    let done = Recorder::new();
    let errors = Recorder::new();
    ep.fail(errors.each()).after("fetch", 2, done.collect());

    let first = ep.group("fetch");
    let second = ep.group("fetch");
    second.err("503");
    first.ok([json!("page")]);

    errors.saw(vec![vec![json!("503")]]);
    done.never_called();
}

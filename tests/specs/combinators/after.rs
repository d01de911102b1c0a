//! `after` and `group` specs

use crate::prelude::*;

#[test]
fn after_zero_calls_back_before_returning() {
    let ep = EventProxy::new();
    let rec = Recorder::new();

    ep.after("e", 0, rec.collect());

    rec.saw(vec![vec![]]);
    assert!(ep.event_names().is_empty());
}

#[test]
fn after_collects_payloads_in_firing_order() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.after("chunk", 3, rec.collect());

    ep.trigger("chunk", &[json!("c1")]).trigger("chunk", &[json!("c2")]);
    rec.never_called();
    ep.trigger("chunk", &[json!("c3")]);
    ep.trigger("chunk", &[json!("c4")]);

    rec.saw(vec![vec![json!("c1"), json!("c2"), json!("c3")]]);
}

#[test]
fn group_results_follow_call_order_not_completion_order() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.after("read", 3, rec.collect());

    let first = ep.group("read");
    let second = ep.group("read");
    let third = ep.group("read");

    third.ok([json!("three")]);
    first.ok([json!("one")]);
    rec.never_called();
    second.ok([json!("two")]);

    rec.saw(vec![vec![json!("one"), json!("two"), json!("three")]]);
}

#[test]
fn group_map_stores_the_transformed_value() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.after("stat", 2, rec.collect());

    let size = |args: &[Value]| json!(args.len());
    let a = ep.group_map("stat", size);
    let b = ep.group_map("stat", size);
    a.ok([json!(1), json!(2)]);
    b.ok([]);

    rec.saw(vec![vec![json!(2), json!(0)]]);
}

#[test]
fn a_group_error_goes_to_the_error_event_and_leaves_after_waiting() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    let errors = Recorder::new();
    ep.bind(ERROR_EVENT, errors.listener());
    ep.after("read", 2, rec.collect());

    let ok = ep.group("read");
    let bad = ep.group("read");
    bad.call(&[json!("ENOENT"), json!("/missing")]);
    ok.ok([json!("content")]);

    errors.saw(vec![vec![json!("ENOENT"), json!("/missing")]]);
    rec.never_called();
}

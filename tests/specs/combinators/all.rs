//! `all` and `tail` specs

use crate::prelude::*;

#[test]
fn all_fires_once_with_payloads_in_name_order() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.all(["a", "b"], rec.collect());

    ep.trigger("b", &[json!("b-data")]);
    rec.never_called();
    ep.trigger("a", &[json!("a-data")]);
    ep.trigger("b", &[json!("again")]);

    rec.saw(vec![vec![json!("a-data"), json!("b-data")]]);
    assert!(ep.event_names().is_empty());
}

#[test]
fn all_keeps_only_the_first_argument_of_each_event() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.assign(["a"], rec.collect());

    ep.trigger("a", &[json!(1), json!(2)]);

    rec.saw(vec![vec![json!(1)]]);
    assert_eq!(ep.fired_data("a"), Some(json!(1)));
}

#[test]
fn all_collapses_duplicate_names() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.all(["a", "a", "b"], rec.collect());

    ep.trigger("a", &[json!(1)]).trigger("b", &[json!(2)]);

    rec.saw(vec![vec![json!(1), json!(2)]]);
}

#[test]
fn all_with_no_events_binds_nothing() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.all(Vec::<String>::new(), rec.collect());

    ep.trigger("anything", &[]);

    rec.never_called();
    assert!(ep.event_names().is_empty());
}

#[test]
fn tail_refires_with_stale_and_fresh_data() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.tail(["a", "b"], rec.each());

    ep.trigger("a", &[json!("a1")]).trigger("b", &[json!("b1")]);
    ep.trigger("b", &[json!("b2")]);

    rec.saw(vec![
        vec![json!("a1"), json!("b1")],
        vec![json!("a1"), json!("b2")],
    ]);
}

#[test]
fn tail_ignores_unrelated_events() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.assign_always(["a"], rec.each());

    ep.trigger("a", &[]).trigger("other", &[]);

    assert_eq!(rec.count(), 1);
}

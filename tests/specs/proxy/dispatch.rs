//! Dispatch specs
//!
//! Verify trigger order, the wildcard channel and deferred firing.

use crate::prelude::*;

#[test]
fn every_listener_runs_once_per_trigger_in_bind_order() {
    let ep = EventProxy::new();
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    for label in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        ep.bind("tick", Listener::new(move |_| order.lock().unwrap().push(label)));
    }

    ep.trigger("tick", &[]).trigger("tick", &[]);

    assert_eq!(
        *order.lock().unwrap(),
        vec!["first", "second", "third", "first", "second", "third"]
    );
}

#[test]
fn emit_and_fire_are_trigger() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.on("ping", rec.listener());

    ep.emit("ping", &[json!(1)]).fire("ping", &[json!(2)]);

    rec.saw(vec![vec![json!(1)], vec![json!(2)]]);
}

#[test]
fn once_runs_a_single_time() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.once("ready", rec.listener());

    ep.trigger("ready", &[json!("a")]).trigger("ready", &[json!("b")]);

    rec.saw(vec![vec![json!("a")]]);
    assert_eq!(ep.listener_count("ready"), 0);
}

#[test]
fn wildcard_sees_every_firing_with_the_event_name_first() {
    let ep = EventProxy::new();
    let all = Recorder::new();
    ep.bind_for_all(all.listener());

    ep.trigger("a", &[json!(1), json!(2)]).trigger("b", &[]);

    all.saw(vec![
        vec![json!("a"), json!(1), json!(2)],
        vec![json!("b")],
    ]);
}

#[test]
fn wildcard_runs_after_the_specific_listeners() {
    let ep = EventProxy::new();
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let wildcard_order = Arc::clone(&order);
    ep.bind_for_all(Listener::new(move |_| {
        wildcard_order.lock().unwrap().push("wildcard")
    }));
    let specific_order = Arc::clone(&order);
    ep.bind("e", Listener::new(move |_| specific_order.lock().unwrap().push("specific")));

    ep.trigger("e", &[]);

    assert_eq!(*order.lock().unwrap(), vec!["specific", "wildcard"]);
}

#[test]
fn the_wildcard_name_cannot_be_triggered() {
    let ep = EventProxy::new();
    let all = Recorder::new();
    ep.bind_for_all(all.listener());

    let result = ep.try_trigger(ALL_EVENT, &[]);
    assert!(matches!(result, Err(ProxyError::ReservedEvent(name)) if name == ALL_EVENT));

    ep.trigger(ALL_EVENT, &[json!("ignored")]);
    all.never_called();
}

#[test]
fn a_listener_unbound_mid_pass_does_not_run() {
    let ep = EventProxy::new();
    let victim = Recorder::new();
    let victim_listener = victim.listener();

    let weak = ep.downgrade();
    let target = victim_listener.clone();
    ep.bind(
        "e",
        Listener::new(move |_| {
            if let Some(ep) = weak.upgrade() {
                ep.unbind(Some("e"), Some(&target));
            }
        }),
    );
    ep.bind("e", victim_listener);

    ep.trigger("e", &[]);

    victim.never_called();
    assert_eq!(ep.listener_count("e"), 1);
}

#[test]
fn immediate_binds_then_fires_with_the_data() {
    let ep = EventProxy::new();
    let rec = Recorder::new();

    ep.immediate("boot", rec.listener(), json!({"pid": 1}));
    ep.asap("boot", Listener::new(|_| {}), json!({"pid": 2}));

    rec.saw(vec![vec![json!({"pid": 1})], vec![json!({"pid": 2})]]);
}

#[test]
fn emit_later_waits_for_the_queue_and_keeps_fifo_order() {
    let ep = EventProxy::new();
    let rec = Recorder::new();
    ep.bind("a", rec.listener()).bind("b", rec.listener());

    ep.emit_later("a", vec![json!(1)]).emit_later("b", vec![json!(2)]);
    rec.never_called();

    assert_eq!(ep.run_pending(), 2);
    rec.saw(vec![vec![json!(1)], vec![json!(2)]]);
}

#[test]
fn emit_later_is_dropped_with_the_proxy() {
    let queue = Arc::new(ManualQueue::new());
    let ep = EventProxy::with_queue(queue.clone());
    let rec = Recorder::new();
    ep.bind("a", rec.listener());

    ep.emit_later("a", vec![]);
    drop(ep);

    assert_eq!(queue.run_pending(), 1);
    rec.never_called();
}

//! Behaviour of `SimpleEventBus` as seen by library users.

mod common;

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use common::{IntegerEvent, TraceEvent};
use event_bus::bus::SharedSubscriber;
use event_bus::test_utils::setup_test_environment;
use event_bus::{
    CancellableEvent, Event, EventBus, EventBusConfig, EventBusError, Key, SimpleEventBus,
};

fn bus() -> SimpleEventBus {
    setup_test_environment();
    SimpleEventBus::new(EventBusConfig::builder().accepts_cancelled(true).build())
}

fn record(label: &'static str) -> impl Fn(&mut TraceEvent) + Send + Sync + 'static {
    move |event: &mut TraceEvent| event.seen.push(label.to_string())
}

#[test]
fn test_initial_key_set_and_subscription_registration() {
    let bus = bus();
    let handler: SharedSubscriber<IntegerEvent> =
        Arc::new(|_: &mut IntegerEvent| panic!("This handler should not be invoked"));

    assert_eq!(bus.keys().len(), 0, "EventBus should be empty initially");

    bus.register(Arc::clone(&handler), 0, true).unwrap();
    assert_eq!(bus.keys().len(), 1, "EventBus should have one registered event");
    assert_eq!(bus.keys()[0], Key::new("nayrid", "integer").unwrap());

    assert_eq!(bus.unsubscribe_subscriber(&handler).unwrap(), 1);
    assert_eq!(bus.keys().len(), 1, "Registrations outlive their subscribers");

    let mut event = IntegerEvent::new(0);
    bus.publish(&mut event).unwrap();
}

#[test]
fn test_subscriber_priorities_and_cancellation_handling() {
    let bus = bus();
    let cancelled_subscription_executed = Arc::new(AtomicBool::new(false));

    bus.subscribe_with_priority(
        |event: &mut IntegerEvent| {
            assert_eq!(event.get(), 0, "Integer value should be unchanged at priority 0")
        },
        0,
    )
    .unwrap();
    bus.subscribe_with_priority(IntegerEvent::increment, 1).unwrap();
    bus.subscribe_with_priority(
        |event: &mut IntegerEvent| {
            assert_eq!(
                event.get(),
                1,
                "Integer value should have been incremented by priority 1"
            )
        },
        2,
    )
    .unwrap();
    bus.subscribe_with_priority(|event: &mut IntegerEvent| event.set_cancelled(true), 3)
        .unwrap();
    bus.subscribe_with(
        |_: &mut IntegerEvent| {
            panic!("Event is cancelled, handler with priority 4 should not be invoked!")
        },
        4,
        false,
    )
    .unwrap();

    let flag = Arc::clone(&cancelled_subscription_executed);
    bus.subscribe_with(
        move |_: &mut IntegerEvent| flag.store(true, Ordering::SeqCst),
        5,
        true,
    )
    .unwrap();

    let mut event = IntegerEvent::new(0);
    bus.publish(&mut event).unwrap();

    assert!(
        cancelled_subscription_executed.load(Ordering::SeqCst),
        "Subscription that accepts cancelled events should have been executed"
    );
    assert_eq!(event.get(), 1);
    assert!(event.cancelled());
}

#[test]
fn test_cancelled_event_return_method() {
    let bus = bus();

    let mut cancelled_event = IntegerEvent::new(0);
    cancelled_event.set_cancelled(true);

    assert!(!bus.publish_cancellable(&mut cancelled_event).unwrap());
    assert!(bus.publish_cancellable(&mut IntegerEvent::new(0)).unwrap());
}

#[test]
fn test_subscribers_can_uncancel() {
    let bus = bus();
    bus.subscribe_with(|event: &mut TraceEvent| event.set_cancelled(true), 0, false)
        .unwrap();
    bus.subscribe_with(record("skipped"), 1, false).unwrap();
    bus.subscribe_with(|event: &mut TraceEvent| event.set_cancelled(false), 2, true)
        .unwrap();
    bus.subscribe_with(record("resumed"), 3, false).unwrap();

    let mut event = TraceEvent::default();
    assert!(bus.publish_cancellable(&mut event).unwrap());
    assert_eq!(event.seen, vec!["resumed"]);
}

#[test]
fn test_equal_priorities_keep_subscription_order() {
    let bus = bus();
    bus.subscribe_with_priority(record("b1"), 1).unwrap();
    bus.subscribe_with_priority(record("a"), 0).unwrap();
    bus.subscribe_with_priority(record("b2"), 1).unwrap();
    bus.subscribe_with_priority(record("c"), i32::MAX).unwrap();
    bus.subscribe_with_priority(record("z"), i32::MIN).unwrap();
    bus.subscribe_with_priority(record("b3"), 1).unwrap();

    let mut event = TraceEvent::default();
    bus.publish(&mut event).unwrap();
    assert_eq!(event.seen, vec!["z", "a", "b1", "b2", "b3", "c"]);
}

#[test]
fn test_unsubscribe_by_id_and_by_instance() {
    let bus = bus();
    let first = bus.subscribe(record("first")).unwrap();
    bus.subscribe(record("second")).unwrap();

    let shared: SharedSubscriber<TraceEvent> = Arc::new(record("shared"));
    bus.register(Arc::clone(&shared), -1, false).unwrap();
    bus.register(Arc::clone(&shared), 10, false).unwrap();

    assert!(bus.unsubscribe::<TraceEvent>(first).unwrap());
    assert_eq!(bus.unsubscribe_subscriber(&shared).unwrap(), 2);

    let mut event = TraceEvent::default();
    bus.publish(&mut event).unwrap();
    assert_eq!(event.seen, vec!["second"]);
}

#[test]
fn test_separate_buses_are_independent() {
    let first = bus();
    let second = bus();
    let calls = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&calls);
    first
        .subscribe(move |_: &mut IntegerEvent| {
            counted.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    second.publish(&mut IntegerEvent::new(0)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    first.publish(&mut IntegerEvent::new(0)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_nested_publish_from_subscriber() {
    let bus = Arc::new(bus());

    let inner = Arc::clone(&bus);
    bus.subscribe(move |event: &mut IntegerEvent| {
        let mut trace = TraceEvent::default();
        trace.seen.push(format!("integer:{}", event.get()));
        inner.publish(&mut trace).unwrap();
        event.increment();
    })
    .unwrap();
    bus.subscribe(record("nested")).unwrap();

    let mut event = IntegerEvent::new(41);
    bus.publish(&mut event).unwrap();
    assert_eq!(event.get(), 42);
}

#[test]
fn test_subscriber_panic_unwinds_through_publish() {
    let bus = bus();
    let later_calls = Arc::new(AtomicUsize::new(0));

    let failing = bus
        .subscribe_with_priority(|_: &mut IntegerEvent| panic!("subscriber failed"), 0)
        .unwrap();
    let counted = Arc::clone(&later_calls);
    bus.subscribe_with_priority(
        move |_: &mut IntegerEvent| {
            counted.fetch_add(1, Ordering::SeqCst);
        },
        1,
    )
    .unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        bus.publish(&mut IntegerEvent::new(0))
    }));
    assert!(outcome.is_err(), "panic should propagate to the publisher");
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);

    // The bus stays usable once the failing subscriber is gone
    assert!(bus.unsubscribe::<IntegerEvent>(failing).unwrap());
    bus.publish(&mut IntegerEvent::new(0)).unwrap();
    assert_eq!(later_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_invalid_key_is_rejected_everywhere() {
    struct Shouting;

    impl Event for Shouting {
        const NAMESPACE: &'static str = "Loud";
        const VALUE: &'static str = "event";

        fn cancelled(&self) -> bool {
            false
        }
    }

    let bus = bus();
    assert!(matches!(
        bus.subscribe(|_: &mut Shouting| {}),
        Err(EventBusError::UnkeyedEvent { .. })
    ));
    assert!(matches!(
        bus.publish(&mut Shouting),
        Err(EventBusError::UnkeyedEvent { .. })
    ));
    assert!(Shouting.key().is_err());
    assert!(bus.keys().is_empty());
}

#[test]
fn test_global_event_bus_publishing() {
    let mut event = IntegerEvent::new(1);
    event
        .publish()
        .expect("Publishing the event via its publish() method should succeed");
    assert!(event.publish_and_return().unwrap());

    assert!(SimpleEventBus::global()
        .keys()
        .contains(&Key::new("nayrid", "integer").unwrap()));
}

#[test]
fn test_snapshot_reflects_subscriptions() {
    let bus = bus();
    bus.subscribe_with(record("a"), 3, false).unwrap();
    bus.subscribe_with(record("b"), -3, true).unwrap();
    bus.subscribe(|_: &mut IntegerEvent| {}).unwrap();

    let snapshot = bus.snapshot();
    assert_eq!(snapshot.events, 2);
    assert_eq!(snapshot.total_subscribers(), 3);
    assert!(snapshot.config.accepts_cancelled());

    let trace = snapshot
        .registration(&Key::new("nayrid", "trace").unwrap())
        .unwrap();
    let priorities: Vec<i32> = trace.subscribers.iter().map(|s| s.priority).collect();
    assert_eq!(priorities, vec![-3, 3]);
    assert!(trace.event_type.ends_with("TraceEvent"));
}

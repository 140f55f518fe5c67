use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use event_bus::{CancellableEvent, Event, EventBus, EventBusConfig, SimpleEventBus};

#[derive(Default)]
struct BaselineEvent {
    counter: u64,
}

impl Event for BaselineEvent {
    const NAMESPACE: &'static str = "bench";
    const VALUE: &'static str = "baseline";

    fn cancelled(&self) -> bool {
        false
    }
}

#[derive(Default)]
struct CancellationEvent {
    counter: u64,
    cancelled: bool,
}

impl Event for CancellationEvent {
    const NAMESPACE: &'static str = "bench";
    const VALUE: &'static str = "cancellation";

    fn cancelled(&self) -> bool {
        self.cancelled
    }
}

impl CancellableEvent for CancellationEvent {
    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

fn benchmark_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");

    for subscribers in [1usize, 10, 100] {
        let bus = SimpleEventBus::new(EventBusConfig::default());
        for priority in 0..subscribers {
            bus.subscribe_with_priority(
                |event: &mut BaselineEvent| event.counter += 1,
                priority as i32,
            )
            .unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("subscribers", subscribers),
            &bus,
            |b, bus| {
                b.iter(|| {
                    let mut event = BaselineEvent::default();
                    bus.publish(&mut event).unwrap();
                    black_box(event.counter)
                })
            },
        );
    }

    group.finish();
}

fn benchmark_cancellation(c: &mut Criterion) {
    let bus = SimpleEventBus::new(EventBusConfig::default());
    bus.subscribe_with_priority(|event: &mut CancellationEvent| event.set_cancelled(true), 0)
        .unwrap();
    for priority in 1..50 {
        bus.subscribe_with(
            |event: &mut CancellationEvent| event.counter += 1,
            priority,
            priority % 2 == 0,
        )
        .unwrap();
    }

    c.bench_function("publish_cancelled", |b| {
        b.iter(|| {
            let mut event = CancellationEvent::default();
            black_box(bus.publish_cancellable(&mut event).unwrap())
        })
    });
}

fn benchmark_subscribe_unsubscribe(c: &mut Criterion) {
    let bus = SimpleEventBus::new(EventBusConfig::default());
    for priority in 0..20 {
        bus.subscribe_with_priority(|_: &mut BaselineEvent| {}, priority)
            .unwrap();
    }

    c.bench_function("subscribe_unsubscribe", |b| {
        b.iter(|| {
            let id = bus
                .subscribe_with_priority(|_: &mut BaselineEvent| {}, 10)
                .unwrap();
            black_box(bus.unsubscribe::<BaselineEvent>(id).unwrap())
        })
    });
}

fn benchmark_concurrent_publish(c: &mut Criterion) {
    const THREADS: usize = 4;

    let bus = SimpleEventBus::new(EventBusConfig::default());
    for priority in 0..10 {
        bus.subscribe_with_priority(|event: &mut BaselineEvent| event.counter += 1, priority)
            .unwrap();
    }

    c.bench_function("concurrent_publish_4_threads", |b| {
        b.iter_custom(|iterations| {
            let per_thread = iterations / THREADS as u64 + 1;
            let start = Instant::now();
            crossbeam::scope(|scope| {
                for _ in 0..THREADS {
                    scope.spawn(|_| {
                        for _ in 0..per_thread {
                            let mut event = BaselineEvent::default();
                            bus.publish(&mut event).unwrap();
                            black_box(event.counter);
                        }
                    });
                }
            })
            .unwrap();
            start.elapsed()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = benchmark_publish,
        benchmark_cancellation,
        benchmark_subscribe_unsubscribe,
        benchmark_concurrent_publish
}
criterion_main!(benches);

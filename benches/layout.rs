//! Benchmarks for chart layout and dispatch.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use streamplot::layout::{compute_orientation, nice_ticks, Orientation};
use streamplot::render::RecordingBackend;
use streamplot::stream::{StreamDispatcher, Subscriptions};
use streamplot::{Result, StreamConfig};

struct NoSubscriptions;

impl Subscriptions for NoSubscriptions {
    fn subscribe(&mut self, _chart_id: &str) -> Result<()> {
        Ok(())
    }
}

fn histogram_payload(buckets: usize) -> String {
    let values: Vec<String> = (0..buckets)
        .map(|i| format!("\"{i}\":{}", (i * 7919) % 1000))
        .collect();
    format!(
        r#"{{"Layout":"histogram","Label":"bench","Bucket":1,"Values":{{{}}}}}"#,
        values.join(",")
    )
}

fn scatter_payload(points: usize) -> String {
    let values: Vec<String> = (0..points)
        .map(|i| format!("\"{}|{i}\":{}", i % 97, (i * 31) % 211))
        .collect();
    format!(
        r#"{{"Layout":"scatterplot","Values":{{{}}}}}"#,
        values.join(",")
    )
}

fn log_payload(count: usize) -> String {
    let values: Vec<String> = (0..count)
        .map(|i| format!("\"{i}\":\"line number {i}\""))
        .collect();
    format!(
        r#"{{"Layout":"logfile","Label":"bench","Count":{count},"Values":{{{}}}}}"#,
        values.join(",")
    )
}

fn dispatcher() -> StreamDispatcher<RecordingBackend> {
    let mut dispatcher = StreamDispatcher::new(RecordingBackend::new(), StreamConfig::default());
    dispatcher.on_message(r#"{"changed":"bench"}"#, &mut NoSubscriptions);
    dispatcher
}

/// Benchmark the pure orientation layout
fn bench_orientation(c: &mut Criterion) {
    c.bench_function("compute_orientation", |b| {
        b.iter(|| {
            compute_orientation(
                black_box(250),
                black_box(500.0),
                black_box(500.0),
                black_box(Orientation::Wide),
            )
        })
    });

    c.bench_function("nice_ticks", |b| {
        b.iter(|| nice_ticks(black_box(-13.7), black_box(9_871.2), black_box(10)))
    });
}

/// Benchmark decode + layout + draw for growing histograms
fn bench_histogram_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_dispatch");
    for buckets in [10, 100, 1_000] {
        let payload = histogram_payload(buckets);
        group.throughput(Throughput::Elements(buckets as u64));
        group.bench_with_input(BenchmarkId::from_parameter(buckets), &payload, |b, payload| {
            let mut dispatcher = dispatcher();
            b.iter(|| dispatcher.on_chart_event("bench", black_box(payload)));
        });
    }
    group.finish();
}

/// Benchmark scatter plots, which keep feed order
fn bench_scatter_dispatch(c: &mut Criterion) {
    let payload = scatter_payload(5_000);
    c.bench_function("scatter_dispatch_5000", |b| {
        let mut dispatcher = dispatcher();
        b.iter(|| dispatcher.on_chart_event("bench", black_box(&payload)));
    });
}

/// Benchmark a log replay, where every line is already shown
fn bench_log_replay(c: &mut Criterion) {
    let payload = log_payload(1_000);
    c.bench_function("log_replay_1000", |b| {
        let mut dispatcher = dispatcher();
        dispatcher.on_chart_event("bench", &payload);
        b.iter(|| dispatcher.on_chart_event("bench", black_box(&payload)));
    });
}

criterion_group!(
    benches,
    bench_orientation,
    bench_histogram_dispatch,
    bench_scatter_dispatch,
    bench_log_replay
);
criterion_main!(benches);

//! Benchmarks for sequential vs dispatched reduction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fork_join::partition;
use fork_join::prelude::*;

fn bench_byte_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte_sum");

    let len = 4 * 1024 * 1024;
    let bytes: Vec<u8> = (0..len).map(|i| (i & 0xff) as u8).collect();
    group.throughput(Throughput::Bytes(len as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| sequential_sum(black_box(&bytes)))
    });

    for worker_cnt in [2usize, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("dispatched", worker_cnt),
            worker_cnt,
            |b, &worker_cnt| {
                let dispatcher = Dispatcher::new();

                b.iter(|| {
                    let partials = PartialSums::new(worker_cnt);
                    dispatcher
                        .dispatch(worker_cnt, |ctx| {
                            let span = span_of(ctx.tid, ctx.worker_cnt, bytes.len());
                            partials.record(
                                ctx.tid,
                                sequential_sum(&bytes[span.start..span.end]),
                            );
                        })
                        .unwrap();
                    black_box(partials.combine())
                });
            },
        );
    }

    group.finish();
}

fn bench_partition_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_split");

    for worker_cnt in [4usize, 64, 256].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(worker_cnt),
            worker_cnt,
            |b, &worker_cnt| {
                b.iter(|| partition::split(black_box(1_000_000_000), black_box(worker_cnt)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_byte_sum, bench_partition_split);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use spa_atomic::ffi::{
    spa_int_add, spa_int_add_explicit, spa_int_create, spa_int_free, SPA_MEMORY_ORDER_RELAXED,
};
use spa_atomic::{AtomicCell, MemoryOrder};
use std::sync::atomic::{AtomicIsize, Ordering};
use std::thread;

const OPS: u64 = 1_000;

fn bench_orderings(c: &mut Criterion) {
    let mut group = c.benchmark_group("fetch_add_by_ordering");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("std_seq_cst", |b| {
        let a = AtomicIsize::new(0);
        b.iter(|| {
            for _ in 0..OPS {
                a.fetch_add(black_box(1), Ordering::SeqCst);
            }
        })
    });

    for order in [
        MemoryOrder::Relaxed,
        MemoryOrder::Acquire,
        MemoryOrder::Release,
        MemoryOrder::AcquireRelease,
        MemoryOrder::SequentiallyConsistent,
    ] {
        group.bench_function(order.to_string(), |b| {
            let cell = AtomicCell::new(0isize);
            b.iter(|| {
                for _ in 0..OPS {
                    cell.add(black_box(1), order);
                }
            })
        });
    }

    group.finish();
}

fn bench_foreign_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("foreign_surface");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("spa_int_add", |b| {
        let h = spa_int_create(0);
        b.iter(|| {
            for _ in 0..OPS {
                // SAFETY: `h` is live for the whole benchmark.
                unsafe { spa_int_add(h, black_box(1)) };
            }
        });
        // SAFETY: no further use.
        unsafe { spa_int_free(h) };
    });

    group.bench_function("spa_int_add_explicit_relaxed", |b| {
        let h = spa_int_create(0);
        b.iter(|| {
            for _ in 0..OPS {
                // SAFETY: `h` is live for the whole benchmark.
                unsafe { spa_int_add_explicit(h, black_box(1), SPA_MEMORY_ORDER_RELAXED) };
            }
        });
        // SAFETY: no further use.
        unsafe { spa_int_free(h) };
    });

    group.finish();
}

fn bench_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");

    group.bench_function("box_atomic_isize_new", |b| {
        b.iter(|| black_box(Box::new(AtomicIsize::new(black_box(1)))))
    });

    group.bench_function("cell_new", |b| {
        b.iter(|| black_box(AtomicCell::new(black_box(1isize))))
    });

    group.bench_function("cell_drop", |b| {
        b.iter_batched(|| AtomicCell::new(1isize), drop, BatchSize::SmallInput)
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_fetch_add");
    const THREADS: u64 = 4;
    group.throughput(Throughput::Elements(OPS * THREADS));

    for order in [MemoryOrder::Relaxed, MemoryOrder::SequentiallyConsistent] {
        group.bench_function(order.to_string(), |b| {
            let cell = AtomicCell::new(0u64);
            b.iter(|| {
                thread::scope(|s| {
                    for _ in 0..THREADS {
                        s.spawn(|| {
                            for _ in 0..OPS {
                                cell.add(1, order);
                            }
                        });
                    }
                });
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_orderings,
    bench_foreign_surface,
    bench_lifecycle,
    bench_contended
);
criterion_main!(benches);

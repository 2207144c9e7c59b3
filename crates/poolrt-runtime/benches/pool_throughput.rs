use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use poolrt_runtime::{spawn, Pool};

fn bench_spawn_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_spawn_throughput");

    for &num_threads in &[1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_threads),
            &num_threads,
            |b, &num_threads| {
                let pool = Pool::new(num_threads).expect("pool should start");
                b.iter(|| {
                    let futures: Vec<_> = (0..256)
                        .map(|i| spawn(&pool, move || black_box(i) * black_box(i)).unwrap())
                        .collect();
                    for future in futures {
                        black_box(future.join());
                    }
                });
                pool.shutdown();
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_spawn_throughput);
criterion_main!(benches);

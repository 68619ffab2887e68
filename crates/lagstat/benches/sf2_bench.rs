use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lagstat::{Accumulator, AccumulatorBuilder, LightCurve};
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

struct BenchLightCurve {
    times: Vec<f64>,
    values: Vec<f64>,
    errors: Vec<f64>,
}

/// generate an irregularly sampled lightcurve with strictly increasing times
fn make_bench_lightcurve(n_observations: usize, seed: u64) -> BenchLightCurve {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let gap_dist = Uniform::new(0.1, 1.0).unwrap();
    let value_dist = Uniform::new(-1.0, 1.0).unwrap();
    let error_dist = Uniform::new(0.01, 0.1).unwrap();

    let mut times = Vec::with_capacity(n_observations);
    let mut current_time = 0.0;
    for _ in 0..n_observations {
        current_time += gap_dist.sample(&mut rng);
        times.push(current_time);
    }
    let values = (0..n_observations)
        .map(|_| value_dist.sample(&mut rng))
        .collect();
    let errors = (0..n_observations)
        .map(|_| error_dist.sample(&mut rng))
        .collect();

    BenchLightCurve {
        times,
        values,
        errors,
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sf2");
    for n_observations in [64usize, 128, 256, 512].into_iter() {
        let n_pairs = ((n_observations * (n_observations - 1)) / 2) as u64;
        let data = make_bench_lightcurve(n_observations, 2525365464_u64);

        // every gap is under 1.0, so the edges cover all possible lags
        let setup_fn = || -> Accumulator {
            AccumulatorBuilder::new()
                .regular_lag_bin_edges(0.0, n_observations as f64, 16)
                .build()
                .unwrap()
        };

        group.throughput(Throughput::Elements(n_pairs));
        group.bench_with_input(
            BenchmarkId::new("Accumulator", n_observations),
            &data,
            |b, data: &BenchLightCurve| {
                let curve = LightCurve::new(&data.times, &data.values, &data.errors).unwrap();
                b.iter_batched_ref(
                    setup_fn,
                    |accum: &mut Accumulator| accum.process(&curve),
                    BatchSize::LargeInput, // we may be able to use BatchSize::SmallInput
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

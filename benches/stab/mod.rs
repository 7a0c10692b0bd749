use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use intstab::IntervalStabber;

use crate::{generate, Lfsr};

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

const N_LOOKUPS: usize = 1_000;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("stab");

    for n_values in [100, 1_000, 10_000] {
        bench_short(n_values, &mut g);
        bench_long(n_values, &mut g);
        bench_short_into(n_values, &mut g);
        bench_long_into(n_values, &mut g);
    }
}

/// Perform [`N_LOOKUPS`] random point queries against `t`.
fn lookups<M>(
    n_values: usize,
    bench_name: &'static str,
    g: &mut BenchmarkGroup<'_, M>,
    t: &IntervalStabber<usize>,
) where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name,
    };

    g.throughput(Throughput::Elements(N_LOOKUPS as _)); // Lookups per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            Lfsr::default,
            |mut rand| {
                for _ in 0..N_LOOKUPS {
                    black_box(t.stab(rand.next()).unwrap());
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

/// As [`lookups()`], but reusing a single result buffer.
fn lookups_into<M>(
    n_values: usize,
    bench_name: &'static str,
    g: &mut BenchmarkGroup<'_, M>,
    t: &IntervalStabber<usize>,
) where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name,
    };

    let mut out = Vec::new();
    g.throughput(Throughput::Elements(N_LOOKUPS as _)); // Lookups per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            Lfsr::default,
            |mut rand| {
                for _ in 0..N_LOOKUPS {
                    out.clear();
                    t.stab_into(rand.next(), &mut out).unwrap();
                    black_box(&out);
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

macro_rules! stab_bench {
    (
        $name:ident,
        $max_len:expr
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>)
            where
                M: Measurement,
            {
                let t = IntervalStabber::new(generate(n_values, $max_len)).unwrap();
                lookups(n_values, stringify!($name), g, &t);
            }

            fn [<bench_ $name _into>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>)
            where
                M: Measurement,
            {
                let t = IntervalStabber::new(generate(n_values, $max_len)).unwrap();
                lookups_into(n_values, stringify!([<$name _into>]), g, &t);
            }
        }
    };
}

// Short intervals rarely overlap, long intervals nest deeply.
stab_bench!(short, 16);
stab_bench!(long, 4_096);

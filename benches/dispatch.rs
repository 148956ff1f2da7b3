//! Benchmarks the scalar/aggregate registry lookups `ImpTable` exposes
//! (§4.E): a `HashMap` get per call, so any regression here means someone
//! replaced the map with something slower on the hot path.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sql_imptable::{Aggregation, ImpTable, SqlOperator};

fn scalar_dispatch(c: &mut Criterion) {
    let table = ImpTable::default();
    c.bench_function("imptable_get_plus", |b| {
        b.iter(|| table.get(black_box(SqlOperator::Plus)));
    });
    c.bench_function("imptable_get_miss", |b| {
        b.iter(|| table.get(black_box(SqlOperator::UserDefinedFunction)));
    });
}

fn aggregate_dispatch(c: &mut Criterion) {
    let table = ImpTable::default();
    c.bench_function("imptable_get_agg_sum", |b| {
        b.iter(|| table.get_agg(black_box(&Aggregation::Sum), false));
    });
    c.bench_function("imptable_get_agg_count_window", |b| {
        b.iter(|| table.get_agg(black_box(&Aggregation::Count), true));
    });
}

criterion_group!(benches, scalar_dispatch, aggregate_dispatch);
criterion_main!(benches);

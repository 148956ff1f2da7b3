//! Benchmarks code generation for a handful of window aggregates (§4.G):
//! each `result()` call only ever builds an `Expr` tree, so this measures
//! tree-construction cost, not live-row execution (out of this crate's
//! scope per §1).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sql_imptable::window::CodeGenWinAggContext;
use sql_imptable::{AggEntry, AggInfo, Aggregation, Expr, ImpTable, SqlType, TypeKind};

fn window_result(c: &mut Criterion, name: &str, agg: Aggregation, operand_types: Vec<SqlType>, return_type: SqlType) {
    let table = ImpTable::default();
    let Some(AggEntry::Win(implementor)) = table.get_agg(&agg, true) else {
        panic!("expected a window-specialized implementor for {agg}");
    };
    let info = AggInfo { agg, operand_types, return_type };
    let ctx = CodeGenWinAggContext;
    let args: Vec<Expr> = info.operand_types.iter().map(|_| Expr::Field(None, "x".into())).collect();
    c.bench_function(name, |b| {
        b.iter(|| implementor.result(&ctx, black_box(&info), &[], black_box(&args)));
    });
}

fn row_number(c: &mut Criterion) {
    window_result(c, "row_number_result", Aggregation::RowNumber, vec![], SqlType::new(TypeKind::BigInt));
}

fn rank(c: &mut Criterion) {
    window_result(c, "rank_result", Aggregation::Rank, vec![], SqlType::new(TypeKind::BigInt));
}

fn lead(c: &mut Criterion) {
    window_result(c, "lead_result", Aggregation::Lead, vec![SqlType::nullable(TypeKind::Int)], SqlType::nullable(TypeKind::Int));
}

criterion_group!(benches, row_number, rank, lead);
criterion_main!(benches);

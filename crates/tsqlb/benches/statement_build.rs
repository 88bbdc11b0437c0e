use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tsqlb::{BuildOptions, Order, Predicate, Ref, Source, Statement, TableDefinition, qb};

fn source() -> Source {
    Source::new()
        .with("t", TableDefinition::new("db", "dbo", "Wide"))
        .with("u", TableDefinition::new("db", "dbo", "Other"))
}

/// SELECT t.col0, ... FROM db.dbo.Wide AS t WHERE t.col0 = 0 AND t.col1 = 1 ... ORDER BY t.col0
fn build_wide_select(source: &Source, n: usize) -> String {
    let mut q = qb::select(source, BuildOptions::new());
    let columns: Vec<Ref> = (0..n).map(|i| q.column("t", &format!("col{i}"))).collect();
    let filter = Predicate::all(
        columns
            .iter()
            .enumerate()
            .map(|(i, c)| c.is_equal_to(i as i64)),
    );

    q.select_refs(&columns).from("t").order_by(&columns[0], Order::Asc);
    if let Some(filter) = filter {
        q.where_clause(filter);
    }
    q.build().unwrap_or_default()
}

fn bench_wide_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_build/wide_select");
    let source = source();

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_wide_select(&source, n)));
        });
    }

    group.finish();
}

fn bench_nested_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_build/nested_arithmetic");

    for depth in [1, 10, 50] {
        let base = Ref::column(Some("t"), "x");
        let expr = (0..depth).fold(base.clone(), |acc, _| acc.multiplied_by(&base));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &expr, |b, expr| {
            b.iter(|| black_box(expr.render()));
        });
    }

    group.finish();
}

fn bench_correlated_subquery(c: &mut Criterion) {
    let source = source();

    c.bench_function("statement_build/correlated_subquery", |b| {
        b.iter(|| {
            let mut q = qb::select(&source, BuildOptions::new());
            let outer = q.column("t", "id");
            let sub = q.subquery(|s| {
                let inner = s.column("u", "wide_id");
                s.select_all_from("u").from("u").where_clause(outer.is_equal_to(&inner));
            });
            if let Ok(sub) = sub {
                q.select(&outer).from("t").where_clause(Predicate::exists(sub));
            }
            black_box(q.build())
        });
    });
}

criterion_group!(
    benches,
    bench_wide_select,
    bench_nested_arithmetic,
    bench_correlated_subquery
);
criterion_main!(benches);

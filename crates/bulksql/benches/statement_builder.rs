use bulksql::{Describe, StatementBuilder, UpdateItem, bind_named, script_statements};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

#[derive(Clone, Describe)]
struct Payload {
    #[orm(db = "sku")]
    sku: Option<String>,
    #[orm(db = "name")]
    name: Option<String>,
    #[orm(db = "price")]
    price: Option<f64>,
    #[orm(db = "qty")]
    qty: Option<i32>,
}

#[derive(Clone, Describe)]
struct Condition {
    #[orm(db = "sku")]
    sku: Option<String>,
    #[orm(db = "id")]
    ids: Option<Vec<i64>>,
}

fn items(n: usize) -> Vec<UpdateItem<Payload, Condition>> {
    (0..n)
        .map(|i| {
            UpdateItem::new(
                Payload {
                    sku: Some(format!("sku_{i}")),
                    name: Some(format!("product_{i}")),
                    price: Some(10_000.0),
                    qty: Some(5),
                },
                Condition {
                    sku: Some(format!("sku_{i}")),
                    ids: None,
                },
            )
        })
        .collect()
}

fn bench_update(c: &mut Criterion) {
    let builder = StatementBuilder::new("products");
    let payload = items(1).remove(0);
    let cond = Condition {
        sku: None,
        ids: Some((0..100).collect()),
    };

    c.bench_function("statement_builder/update", |b| {
        b.iter(|| black_box(builder.update(&payload.payload, &payload.condition)));
    });
    c.bench_function("statement_builder/update_bind_list_100", |b| {
        b.iter(|| {
            let stmt = builder.update(&payload.payload, &cond).unwrap();
            black_box(stmt.bind())
        });
    });
}

fn bench_bulk_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/bulk_update");
    let builder = StatementBuilder::new("products");

    for n in [10, 100, 1_000, 15_000] {
        let batch = items(n);
        group.bench_with_input(BenchmarkId::new("build", n), &batch, |b, batch| {
            b.iter(|| black_box(builder.bulk_update(batch)));
        });

        let stmt = builder.bulk_update(&batch).unwrap();
        group.bench_with_input(BenchmarkId::new("bind", n), &stmt, |b, stmt| {
            b.iter(|| {
                for sql in script_statements(&stmt.sql) {
                    black_box(bind_named(sql, &stmt.binds).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_bulk_update);
criterion_main!(benches);

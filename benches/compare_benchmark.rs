//! Benchmarks for normalization and comparison.

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use resource_delta::{Comparator, NormalizerRegistry};
use serde_json::{json, Map, Value};
use std::hint::black_box;

fn secret(entries: usize, encoded: bool) -> Value {
    let entries: Map<String, Value> = (0..entries)
        .map(|i| {
            let plain = format!("value-{i}");
            let value = if encoded { B64.encode(plain) } else { plain };
            (format!("key-{i}"), Value::from(value))
        })
        .collect();
    let field = if encoded { "data" } else { "stringData" };
    json!({"apiVersion": "v1", "kind": "Secret", field: entries})
}

fn deployment(containers: usize) -> Value {
    let containers: Vec<Value> = (0..containers)
        .map(|i| {
            json!({
                "name": format!("c{i}"),
                "image": "nginx:1.25",
                "ports": [{"containerPort": 8080 + i}],
                "env": [{"name": "MODE", "value": "prod"}]
            })
        })
        .collect();
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": "web", "labels": {"app": "web"}},
        "spec": {"replicas": 3, "template": {"spec": {"containers": containers}}}
    })
}

fn bench_normalize(c: &mut Criterion) {
    let registry = NormalizerRegistry::with_builtin_rules();
    let mut group = c.benchmark_group("normalize_secret");
    for size in [10, 100, 1000] {
        let doc = secret(size, false);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| registry.normalize(black_box(doc)));
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let comparator = Comparator::default();
    let mut group = c.benchmark_group("compare_deployment");
    for size in [1, 10, 100] {
        let desired = deployment(size);
        let mut observed = deployment(size);
        observed["spec"]["replicas"] = json!(5);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(desired, observed),
            |b, (desired, observed)| {
                b.iter(|| {
                    comparator.compare(black_box(desired.clone()), black_box(observed.clone()))
                });
            },
        );
    }
    group.finish();
}

fn bench_compare_batch(c: &mut Criterion) {
    let comparator = Comparator::default();
    let pairs: Vec<(Value, Value)> = (0..64)
        .map(|_| (secret(50, false), secret(50, true)))
        .collect();
    c.bench_function("compare_batch_64_secrets", |b| {
        b.iter(|| comparator.compare_batch(black_box(pairs.clone())));
    });
}

criterion_group!(benches, bench_normalize, bench_compare, bench_compare_batch);
criterion_main!(benches);

//! Permission check benchmarks
//!
//! Measures a full check (definition invocation, matching, evaluation) as
//! the declared rule count grows.

use abilities::{AbilityEngine, AbilityRegistry, Condition, Entity};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::runtime::Runtime;

struct User;

impl Entity for User {
    fn entity_type(&self) -> &str {
        "user"
    }
}

struct Document {
    owner: &'static str,
}

impl Entity for Document {
    fn entity_type(&self) -> &str {
        "document"
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "owner" => Some(json!(self.owner)),
            _ => None,
        }
    }
}

fn engine_with_rules(rule_count: usize) -> AbilityEngine {
    let registry = Arc::new(AbilityRegistry::new());
    registry.configure("user", move |_, rules| {
        for i in 0..rule_count {
            rules.can(format!("action-{i}"), "document", None);
        }
        rules.can(
            "read",
            "document",
            Condition::attributes([("owner", "alice")]),
        );
    });
    AbilityEngine::new(registry)
}

fn bench_check_scaling(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("permission_check");

    for rule_count in [10usize, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("rules", rule_count),
            &rule_count,
            |b, &count| {
                let engine = engine_with_rules(count);
                let user = User;
                let document = Document { owner: "alice" };

                b.to_async(&rt).iter(|| async {
                    let outcome = engine
                        .can(black_box(&user), "read", black_box(&document), &[])
                        .await
                        .unwrap();
                    black_box(outcome);
                });
            },
        );
    }

    group.finish();
}

fn bench_validator_check(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let registry = Arc::new(AbilityRegistry::new());
    registry.configure("user", |_, rules| {
        rules.can(
            "read",
            "document",
            Condition::validator(|subject, _| Ok(json!(subject.attribute("owner").is_some()))),
        );
    });
    let engine = AbilityEngine::new(registry);

    c.bench_function("validator_check", |b| {
        let user = User;
        let document = Document { owner: "alice" };

        b.to_async(&rt).iter(|| async {
            let outcome = engine
                .can(black_box(&user), "read", black_box(&document), &[])
                .await
                .unwrap();
            black_box(outcome);
        });
    });
}

criterion_group!(benches, bench_check_scaling, bench_validator_check);
criterion_main!(benches);

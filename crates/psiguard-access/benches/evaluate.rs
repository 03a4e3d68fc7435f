//! Performance benchmarks for rule evaluation.
//!
//! Evaluation sits on every document operation, so it has to stay cheap.
//! These benchmarks cover the main rule shapes: role gates, ownership
//! comparisons, and participant resolution.
//!
//! Run with: `cargo bench -p psiguard-access evaluate`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use psiguard_access::Principal;
use psiguard_access::policy::context::{PolicyContext, PolicyContextBuilder};
use psiguard_access::policy::engine::{PolicyEvaluator, PolicyEvaluatorConfig};
use psiguard_core::{Operation, ResourceKind, Role};
use serde_json::json;

fn quiet_evaluator() -> PolicyEvaluator {
    PolicyEvaluator::new(PolicyEvaluatorConfig {
        log_decisions: false,
    })
}

/// Role-gated allow: psychologist reading a patient record.
fn role_gated_context() -> PolicyContext {
    PolicyContextBuilder::new()
        .with_principal(Principal::authenticated("psy1", Some(Role::Psychologist)))
        .with_operation(Operation::Read)
        .with_collection(ResourceKind::Patient, "patients", Some("p1"))
        .build()
        .expect("context")
}

/// Ownership comparison against a stored document.
fn ownership_context() -> PolicyContext {
    PolicyContextBuilder::new()
        .with_principal(Principal::authenticated("psy1", Some(Role::Psychologist)))
        .with_operation(Operation::Update)
        .with_collection(ResourceKind::Appointment, "appointments", Some("a1"))
        .with_incoming(json!({
            "psychologistId": "psy1",
            "patientId": "pat1",
            "slot": "2026-03-01T10:00",
        }))
        .with_existing(json!({
            "psychologistId": "psy1",
            "patientId": "pat1",
            "slot": "2026-02-01T10:00",
        }))
        .build()
        .expect("context")
}

/// Chat creation with a resolved participants map.
fn participants_context(participant_count: usize) -> PolicyContext {
    let ids: Vec<String> = (0..participant_count).map(|i| format!("user-{i}")).collect();
    let participants: serde_json::Map<String, serde_json::Value> = ids
        .iter()
        .map(|id| (id.clone(), serde_json::Value::Bool(true)))
        .collect();

    let mut builder = PolicyContextBuilder::new()
        .with_principal(Principal::authenticated("user-0", None))
        .with_operation(Operation::Create)
        .with_collection(ResourceKind::Chat, "chats", None)
        .with_incoming(json!({ "participants": participants }));
    for id in &ids {
        builder = builder.with_participant(id.clone(), true);
    }
    builder.build().expect("context")
}

/// Unauthenticated deny, the cheapest path.
fn anonymous_context() -> PolicyContext {
    PolicyContextBuilder::new()
        .with_principal(Principal::anonymous())
        .with_operation(Operation::Read)
        .with_collection(ResourceKind::Patient, "patients", Some("p1"))
        .build()
        .expect("context")
}

fn bench_role_gate(c: &mut Criterion) {
    let evaluator = quiet_evaluator();
    let context = role_gated_context();

    c.bench_function("evaluate_role_gate", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(&context))));
    });
}

fn bench_ownership_match(c: &mut Criterion) {
    let evaluator = quiet_evaluator();
    let context = ownership_context();

    c.bench_function("evaluate_ownership_match", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(&context))));
    });
}

fn bench_anonymous_deny(c: &mut Criterion) {
    let evaluator = quiet_evaluator();
    let context = anonymous_context();

    c.bench_function("evaluate_anonymous_deny", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(&context))));
    });
}

fn bench_chat_participants(c: &mut Criterion) {
    let evaluator = quiet_evaluator();

    for count in [2, 8, 32] {
        let context = participants_context(count);
        c.bench_function(&format!("evaluate_chat_participants_{count}"), |b| {
            b.iter(|| black_box(evaluator.evaluate(black_box(&context))));
        });
    }
}

criterion_group!(
    benches,
    bench_role_gate,
    bench_ownership_match,
    bench_anonymous_deny,
    bench_chat_participants,
);

criterion_main!(benches);

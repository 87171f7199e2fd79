//! Audit Performance Benchmarks
//!
//! Measures full-catalog evaluation over models of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gateway_audit::loader::service_from_json;
use gateway_audit::{
    namespace, AuditConfig, AuditEngine, Backend, Capability, Endpoint, EndpointFlags,
    RuleCatalog, RuleSelector, Service, ServiceFlags,
};
use std::time::Duration;

/// Build a model with `endpoints` endpoints, each with two backends
fn generate_service(endpoints: usize) -> Service {
    (0..endpoints).fold(
        Service::new()
            .with_flags(ServiceFlags::HAS_TLS | ServiceFlags::TLS_ENABLED)
            .with_capability(namespace::CORS, Capability::enabled())
            .with_capability(namespace::METRICS, Capability::enabled()),
        |service, i| {
            let path = format!("/api/v1/resource-{}", i);
            service.with_endpoint(
                Endpoint::new()
                    .with_path(&path)
                    .with_flags(EndpointFlags::ENCODING_JSON)
                    .with_timeout(Duration::from_millis(500 * (i as u64 % 20)))
                    .with_backend(Backend::new().with_host("http://primary.internal"))
                    .with_backend(
                        Backend::new()
                            .with_host("http://secondary.internal")
                            .with_capability(namespace::CIRCUIT_BREAKER, Capability::enabled()),
                    ),
            )
        },
    )
}

fn benchmark_model_sizes(c: &mut Criterion) {
    let engine = AuditEngine::new(AuditConfig::default()).unwrap();

    let mut group = c.benchmark_group("model_sizes");

    for endpoints in [0, 10, 100, 1_000] {
        let service = generate_service(endpoints);
        group.throughput(Throughput::Elements(endpoints.max(1) as u64));
        group.bench_with_input(
            BenchmarkId::new("evaluate", endpoints),
            &service,
            |b, service| b.iter(|| engine.evaluate(black_box(service))),
        );
    }

    group.finish();
}

fn benchmark_rule_selection(c: &mut Criterion) {
    let catalog = RuleCatalog::builtin().unwrap();
    let service = generate_service(100);

    let mut group = c.benchmark_group("rule_selection");

    let configs = [
        ("all_rules", AuditConfig::default()),
        (
            "ignore_telemetry",
            AuditConfig::default().ignoring(RuleSelector::parse_list("@telemetry,5.*")),
        ),
        (
            "critical_only",
            AuditConfig::default().with_severities(vec![gateway_audit::Severity::Critical]),
        ),
    ];

    for (name, config) in configs {
        let engine = AuditEngine::with_catalog(&catalog, config);
        group.bench_function(name, |b| b.iter(|| engine.evaluate(black_box(&service))));
    }

    group.finish();
}

fn benchmark_load_and_audit(c: &mut Criterion) {
    let engine = AuditEngine::new(AuditConfig::default()).unwrap();
    let json = serde_json::to_string(&generate_service(100)).unwrap();

    let mut group = c.benchmark_group("load_and_audit");
    group.throughput(Throughput::Bytes(json.len() as u64));

    group.bench_function("json_100_endpoints", |b| {
        b.iter(|| {
            let service = service_from_json(black_box(&json)).unwrap();
            engine.evaluate(&service)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_model_sizes,
    benchmark_rule_selection,
    benchmark_load_and_audit,
);

criterion_main!(benches);

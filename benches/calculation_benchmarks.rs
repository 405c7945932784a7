//! Performance benchmarks for the payroll engine.
//!
//! Covers the calculation core on its own, the same calculation through the
//! HTTP router, and how cost scales with the number of additional benefits.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::calculation::{calculate_isr, calculate_payroll};
use payroll_engine::config::ConfigLoader;
use payroll_engine::history::HistoryStore;
use payroll_engine::models::{
    AdditionalBenefits, CalculationInput, CustomBenefit, PayPeriod, RiskClass,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/mx2024").expect("Failed to load config")
}

/// Creates an input with `benefit_count` custom benefits.
fn create_input(benefit_count: usize) -> CalculationInput {
    let other = (0..benefit_count)
        .map(|i| CustomBenefit {
            name: format!("Benefit {}", i + 1),
            amount: Decimal::from(100 + i as i64),
            is_annual: i % 2 == 0,
        })
        .collect();

    CalculationInput {
        gross_salary: Decimal::from(15000),
        period: PayPeriod::Monthly,
        jurisdiction: "CDMX".to_string(),
        risk_class: RiskClass::III,
        ptu_amount: Some(Decimal::from(500)),
        employee_tenure_years: Decimal::from(3),
        additional_benefits: Some(AdditionalBenefits {
            performance_bonus: Some(Decimal::from(12000)),
            meal_vouchers: Some(Decimal::from(1000)),
            other,
            ..Default::default()
        }),
    }
}

/// Benchmark: ISR bracket lookup.
fn bench_isr(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();
    let salary = Decimal::from(5_000_000);

    c.bench_function("isr_top_bracket", |b| {
        b.iter(|| black_box(calculate_isr(black_box(salary), config)))
    });
}

/// Benchmark: Full calculation without HTTP.
fn bench_calculate_payroll(c: &mut Criterion) {
    let loader = load_config();
    let input = create_input(0);

    c.bench_function("calculate_payroll", |b| {
        b.iter(|| black_box(calculate_payroll(black_box(&input), loader.config())))
    });
}

/// Benchmark: Full calculation through the router, including history.
fn bench_http_calculate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config(), HistoryStore::in_memory()));
    let body = serde_json::json!({
        "gross_salary": "15000",
        "period": "monthly",
        "jurisdiction": "CDMX",
        "risk_class": "III",
        "employee_tenure_years": 3
    })
    .to_string();

    c.bench_function("http_calculate", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Scaling with the number of custom benefits.
fn bench_scaling(c: &mut Criterion) {
    let loader = load_config();
    let mut group = c.benchmark_group("benefit_scaling");

    for benefit_count in [0usize, 5, 20, 100] {
        let input = create_input(benefit_count);
        group.throughput(Throughput::Elements(benefit_count.max(1) as u64));
        group.bench_with_input(
            BenchmarkId::new("custom_benefits", benefit_count),
            &input,
            |b, input| b.iter(|| black_box(calculate_payroll(input, loader.config()))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_isr,
    bench_calculate_payroll,
    bench_http_calculate,
    bench_scaling,
);
criterion_main!(benches);

//! Benchmark suite for playlearn-algo
//!
//! Run with: cargo bench

use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use playlearn_algo::{
    generate_batch, summarize, Catalog, GameType, GeneratorConfig, ItemResult, MathCategory,
    PlannerConfig, ProblemGenerator, ResultRecord, RewardTier, SessionPlanner,
    SubjectRequirements,
};

fn bench_plan_unit(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let mut planner = SessionPlanner::with_seed(PlannerConfig::default(), 1);

    let mut group = c.benchmark_group("SessionPlanner::plan");
    for unit in catalog.units() {
        group.bench_with_input(BenchmarkId::from_parameter(&unit.id), unit, |b, unit| {
            b.iter(|| planner.plan(black_box(unit)))
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut generator = ProblemGenerator::with_seed(GeneratorConfig::default(), 2);

    let mut group = c.benchmark_group("ProblemGenerator::generate");
    for category in MathCategory::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(category.as_str()),
            &category,
            |b, category| b.iter(|| generator.generate(black_box(*category))),
        );
    }
    group.finish();

    c.bench_function("ProblemGenerator::judgment", |b| {
        b.iter(|| generator.judgment(black_box(MathCategory::DivideRemainder)))
    });
    c.bench_function("ProblemGenerator::multiple_choice", |b| {
        b.iter(|| generator.multiple_choice(black_box(MathCategory::MultiplyTwoByTwo), 4))
    });
}

fn bench_generate_batch(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    c.bench_function("generate_batch/1000", |b| {
        b.iter(|| generate_batch(MathCategory::PrimeFactorization, 1000, black_box(3), &config))
    });
}

fn bench_summarize(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let games = GameType::ENGLISH;
    let records: Vec<ResultRecord> = (0..2000)
        .map(|i| {
            let items = (0..8)
                .map(|j| ItemResult::new(format!("term-{}", (i + j) % 60), (i * j) % 3 != 0, "bench"))
                .collect();
            ResultRecord::new(
                games[i % games.len()],
                (i % 9) as i64,
                10,
                items,
                format!("session-{}", i / 16),
                start + Duration::minutes(i as i64),
            )
        })
        .collect();
    let tiers = RewardTier::default_table();
    let requirements = SubjectRequirements::default();

    c.bench_function("summarize/2000", |b| {
        b.iter(|| summarize(black_box(&records), &tiers, &requirements))
    });
}

criterion_group!(
    benches,
    bench_plan_unit,
    bench_generate,
    bench_generate_batch,
    bench_summarize
);
criterion_main!(benches);

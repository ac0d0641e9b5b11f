use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use kindred::{
    AnalogyEstimator, CostDriver, EffortUnit, ProjectDatabase, ProjectProfile, ProjectRecord,
};

/// Builds a database of `n` fully-rated synthetic projects with ratings
/// spread deterministically across the scale.
fn synthetic_database(n: usize) -> ProjectDatabase {
    let records = (0..n).map(|i| {
        let mut record = ProjectRecord::new(
            format!("proj-{i:05}"),
            5.0 + (i % 90) as f64,
            20.0 + (i % 400) as f64,
        );
        for (j, driver) in CostDriver::ALL.iter().enumerate() {
            record = record.with(*driver, ((i + j) % 6) as i64);
        }
        record
    });
    ProjectDatabase::from_records(records).expect("synthetic ids are unique")
}

fn bench_similarity_sweep(c: &mut Criterion) {
    let profile = ProjectProfile::new().with_all(3);
    let estimator = AnalogyEstimator::new();

    let mut group = c.benchmark_group("similarity_sweep");
    for size in [60usize, 1_000, 10_000] {
        let database = synthetic_database(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &database, |b, db| {
            b.iter(|| estimator.compute_similarities(db, &profile));
        });
    }
    group.finish();
}

fn bench_end_to_end_estimate(c: &mut Criterion) {
    let database = synthetic_database(1_000);
    let profile = ProjectProfile::new().with_all(3);
    let estimator = AnalogyEstimator::new().with_threshold(0.3);

    c.bench_function("estimate_effort/1000", |b| {
        b.iter(|| {
            estimator
                .estimate_effort(&database, &profile, EffortUnit::Hours)
                .ok()
        });
    });
}

criterion_group!(benches, bench_similarity_sweep, bench_end_to_end_estimate);
criterion_main!(benches);

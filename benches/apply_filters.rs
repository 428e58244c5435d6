use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plantpal::{apply_filters, default_catalog, reset_filters, PreferenceCriteria, RandomJitter};

fn bench_apply_filters(c: &mut Criterion) {
    let catalog = default_catalog();
    let defaults = reset_filters();
    let open = PreferenceCriteria {
        indoor_only: false,
        selected_types: vec![],
        water_requirement: 50.0,
        ..reset_filters()
    };
    let mut jitter = RandomJitter::seeded(42);

    c.bench_function("apply_filters_defaults", |b| {
        b.iter(|| apply_filters(black_box(&catalog), black_box(&defaults), &mut jitter))
    });

    c.bench_function("apply_filters_unfiltered", |b| {
        b.iter(|| apply_filters(black_box(&catalog), black_box(&open), &mut jitter))
    });
}

criterion_group!(benches, bench_apply_filters);
criterion_main!(benches);

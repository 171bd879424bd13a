use criterion::{Criterion, criterion_group, criterion_main};
use drinkviz::core::{
    BinningStrategy, CategorySet, DEFAULT_KEY_COLUMN, Dataset, LinearScale, PlotArea, Record,
    bin_records, extent, layout_histogram,
};
use drinkviz::render::{NullRenderer, diff_scenes};
use drinkviz::{Dashboard, DashboardConfig};
use std::hint::black_box;

fn generated_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let i = i as i64;
            Record::new(format!("country-{i}"))
                .with_field("beer_servings", (i * 37) % 380)
                .with_field("wine_servings", (i * 53) % 370)
                .with_field("spirit_servings", (i * 71) % 440)
                .with_field("total_litres_of_pure_alcohol", (i * 13) % 15)
        })
        .collect()
}

fn total(record: &Record) -> f64 {
    record.value("total_litres_of_pure_alcohol") as f64
}

fn bench_binning_10k(c: &mut Criterion) {
    let records = generated_records(10_000);
    let domain = extent(&records, total).expect("non-empty extent");
    let strategy = BinningStrategy::Uniform { count: 14 };

    c.bench_function("binning_uniform_10k", |b| {
        b.iter(|| {
            let _ = bin_records(black_box(&records), total, black_box(domain), &strategy)
                .expect("binning should succeed");
        })
    });
}

fn bench_layout_10k(c: &mut Criterion) {
    let records = generated_records(10_000);
    let domain = extent(&records, total).expect("non-empty extent");
    let binned = bin_records(&records, total, domain, &BinningStrategy::NiceTicks { count: 14 })
        .expect("binning should succeed");
    let plot = PlotArea {
        left: 80.0,
        top: 20.0,
        width: 1020.0,
        height: 450.0,
    };
    let axis = LinearScale::new(domain, (420.0, 20.0)).expect("valid axis");
    let categories = CategorySet::default();

    c.bench_function("histogram_layout_10k", |b| {
        b.iter(|| {
            let _ = layout_histogram(
                black_box(&records),
                black_box(&binned),
                &categories,
                plot,
                axis,
            )
            .expect("layout should succeed");
        })
    });
}

fn bench_dashboard_scene_diff_2k(c: &mut Criterion) {
    let dataset = Dataset::from_records(DEFAULT_KEY_COLUMN, generated_records(2_000));
    let mut dashboard = Dashboard::new(
        NullRenderer::default(),
        DashboardConfig::default().with_seed(17),
        dataset,
    )
    .expect("dashboard init");
    let appearing = dashboard.scene();
    dashboard.tick(10.0);

    c.bench_function("dashboard_scene_build_2k", |b| {
        b.iter(|| {
            let _ = black_box(dashboard.scene());
        })
    });

    c.bench_function("dashboard_scene_diff_2k", |b| {
        let next = dashboard.scene();
        b.iter(|| {
            let _ = diff_scenes(black_box(Some(&appearing)), black_box(&next));
        })
    });
}

criterion_group!(
    benches,
    bench_binning_10k,
    bench_layout_10k,
    bench_dashboard_scene_diff_2k
);
criterion_main!(benches);

//! 生成器与分析性能基准测试

use std::hint::black_box;

use chrono::{TimeZone, Utc};
use clickgen::analytics::{JoinedClick, build_report};
use clickgen::config::{GenerationParams, Preset};
use clickgen::generator::events::{sample_latencies, sample_timestamps};
use clickgen::generator::{Dataset, GenerationWindow, generate_dataset};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn window(params: &GenerationParams) -> GenerationWindow {
    GenerationWindow::ending_at(
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        params.window_days,
    )
    .unwrap()
}

fn params(preset: Preset, clicks: usize) -> GenerationParams {
    let mut params = preset.params();
    params.num_clicks = clicks;
    params
}

// ============== 整体生成 ==============

fn bench_generate_dataset(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/dataset");
    group.sample_size(10);

    for preset in [Preset::Global, Preset::Europe] {
        for clicks in [10_000usize, 50_000] {
            let params = params(preset, clicks);
            let window = window(&params);
            group.bench_with_input(
                BenchmarkId::new(preset.to_string(), clicks),
                &params,
                |b, params| {
                    b.iter(|| {
                        let mut rng = StdRng::seed_from_u64(42);
                        black_box(generate_dataset(&mut rng, params, &window).unwrap())
                    });
                },
            );
        }
    }

    group.finish();
}

// ============== 单列采样 ==============

fn bench_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/columns");
    let europe = Preset::Europe.params();
    let window = window(&europe);

    group.bench_function("diurnal_timestamps_100k", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| black_box(sample_timestamps(&mut rng, &europe.timestamps, &window, 100_000)));
    });

    group.bench_function("mixture_latencies_100k", |b| {
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| black_box(sample_latencies(&mut rng, &europe.latency, 100_000)));
    });

    group.finish();
}

// ============== 报告 ==============

fn joined(dataset: Dataset) -> Vec<JoinedClick> {
    dataset
        .events
        .events
        .into_iter()
        .map(|event| JoinedClick { event, link: None })
        .collect()
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics/report");
    group.sample_size(10);

    let params = params(Preset::Global, 50_000);
    let mut rng = StdRng::seed_from_u64(3);
    let rows = joined(generate_dataset(&mut rng, &params, &window(&params)).unwrap());

    group.bench_function("build_report_50k", |b| {
        b.iter(|| black_box(build_report(&rows, 10)));
    });

    group.finish();
}

criterion_group!(benches, bench_generate_dataset, bench_columns, bench_report);
criterion_main!(benches);

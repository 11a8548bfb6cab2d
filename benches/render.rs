use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use photon::{render, RenderSettings, Scene};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");

    let scene = Scene::reference();
    let settings = RenderSettings {
        width: 32,
        height: 32,
        samples_per_significance: 20.0,
        ..RenderSettings::default()
    };

    group.throughput(Throughput::Elements(u64::from(settings.width * settings.height)));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("reference scene 32x32", |b| {
        b.iter(|| render(black_box(&scene), black_box(&settings)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

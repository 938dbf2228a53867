use criterion::{black_box, criterion_group, criterion_main, Criterion};
use detection_core::engine::DetectionEngine;
use detection_core::obstacle::Obstacle;
use detection_core::types::ObstacleCategory;
use sensor_models::geometry::polar_to_cartesian;
use sensor_models::sensor::{SensorKind, SensorSpec};

fn make_obstacles(n: usize) -> Vec<Obstacle> {
    (0..n)
        .map(|i| {
            let bearing = i as f64 * 360.0 / n as f64;
            let range = 5.0 + (i % 25) as f64;
            let category = ObstacleCategory::ALL[i % ObstacleCategory::ALL.len()];
            Obstacle::new(i as u64, category, polar_to_cartesian(range, bearing))
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let engine = DetectionEngine::new(vec![
        SensorSpec::sector(SensorKind::Camera, 25.0, 120.0).unwrap(),
        SensorSpec::sector(SensorKind::Radar, 15.0, 60.0).unwrap(),
        SensorSpec::omni(SensorKind::Lidar, 20.0).unwrap(),
    ]);
    let mut group = c.benchmark_group("engine");

    for n in [10, 100, 1000, 10000] {
        let obstacles = make_obstacles(n);
        group.bench_function(format!("{n}_obstacles"), |b| {
            b.iter(|| black_box(engine.evaluate(0, black_box(&obstacles))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);

use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use garmin_dashboard::{PipelineConfig, build_snapshot};
use std::hint::black_box;

fn synthetic_batch(size: usize) -> Vec<serde_json::Value> {
    let types = ["running", "cycling", "lap_swimming", "open_water_swimming"];
    (0..size)
        .map(|i| {
            let day = 1 + (i % 28);
            let month = 1 + (i / 28) % 12;
            serde_json::json!({
                "activityId": i,
                "activityName": format!("session {i}"),
                "activityType": {"typeKey": types[i % types.len()]},
                "startTimeLocal": format!("2024-{month:02}-{day:02} 07:00:00"),
                "distance": 5000.0 + (i as f64) * 10.0,
                "duration": 1800.0,
                "calories": 300.0
            })
        })
        .collect()
}

fn bench_build_snapshot(c: &mut Criterion) {
    let batch = synthetic_batch(1000);
    let config = PipelineConfig::default();

    c.bench_function("build_snapshot_1000_activities", |b| {
        b.iter(|| {
            let run = build_snapshot(black_box(&batch), &config, Utc::now()).expect("snapshot");
            black_box(run)
        })
    });
}

criterion_group!(benches, bench_build_snapshot);
criterion_main!(benches);

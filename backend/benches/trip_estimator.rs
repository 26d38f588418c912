use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pluggist::{
    config::EstimatorConfig,
    estimator::estimate_trip,
    models::{VehicleProfile, Waypoint},
    places::{CityDirectory, WaypointProvider},
};

fn benchmark_estimator(c: &mut Criterion) {
    let config = EstimatorConfig::default();
    let vehicle = VehicleProfile {
        model_id: "custom".into(),
        range_miles: 120.0,
    };

    let mut group = c.benchmark_group("estimate_trip");
    let test_cases = [
        ("direct", "Dallas", "Austin"),
        ("corridor", "Seattle", "Denver"),
        ("generated", "Miami", "Seattle"),
    ];

    for (name, from, to) in test_cases {
        let waypoints: Vec<Waypoint> = CityDirectory
            .waypoints(from, to, vehicle.range_miles)
            .expect("demo cities");
        group.bench_with_input(BenchmarkId::from_parameter(name), &waypoints, |b, waypoints| {
            b.iter(|| estimate_trip(black_box(waypoints), &vehicle, &config))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_estimator);
criterion_main!(benches);

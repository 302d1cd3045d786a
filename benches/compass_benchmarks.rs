use compass_core::compass::{orientation, rotation_matrix};
use compass_core::platform::mock::{MockLocationProvider, MockSensorHub};
use compass_core::{
    CompassTracker, Coordinate, HeadingEstimator, HeadingFilter, SensorEvent, SensorKind,
    TiltSource, calculate_bearing,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nalgebra::Vector3;
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;

// Pre-generated sensor data to eliminate RNG overhead during benchmarks
struct PreGeneratedData {
    samples: Vec<(Vector3<f32>, Vector3<f32>)>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f32 * 0.02; // 50Hz, a typical game-rate sensor delay

            // Slow sweep of the heading with small hand tremor
            let heading = time * 0.2 * 2.0 * PI;

            let gravity = Vector3::new(
                0.3 * (heading * 1.7).sin() + rng.random_range(-0.05..0.05),
                0.3 * (heading * 1.3).cos() + rng.random_range(-0.05..0.05),
                9.8 + rng.random_range(-0.05..0.05),
            );

            let magnetic = Vector3::new(
                -22.0 * heading.sin() + rng.random_range(-0.5..0.5),
                22.0 * heading.cos() + rng.random_range(-0.5..0.5),
                -40.0 + rng.random_range(-0.5..0.5),
            );

            samples.push((gravity, magnetic));
        }

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> (Vector3<f32>, Vector3<f32>) {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

/// Benchmark the rotation matrix and azimuth extraction
fn bench_rotation_matrix(c: &mut Criterion) {
    let gravity = Vector3::new(0.2, -0.1, 9.8);
    let magnetic = Vector3::new(5.0, 20.0, -38.0);

    c.bench_function("rotation_matrix_orientation", |b| {
        b.iter(|| rotation_matrix(black_box(gravity), black_box(magnetic)).map(|r| orientation(&r)))
    });
}

/// Benchmark a single smoothing step
fn bench_filter_update(c: &mut Criterion) {
    let mut filter = HeadingFilter::default();

    c.bench_function("heading_filter_update", |b| {
        b.iter(|| filter.update(black_box(123.4)))
    });
}

/// Benchmark estimator updates with realistic noisy samples
fn bench_estimator_update(c: &mut Criterion) {
    let mut data = PreGeneratedData::new(1000, 42);
    let mut estimator = HeadingEstimator::new();
    estimator.start(TiltSource::Gravity);

    c.bench_function("estimator_update_pair", |b| {
        b.iter(|| {
            let (gravity, magnetic) = data.next();
            estimator.on_sample(SensorEvent::new(SensorKind::Gravity, black_box(gravity)));
            estimator.on_sample(SensorEvent::new(
                SensorKind::MagneticField,
                black_box(magnetic),
            ))
        })
    });
}

/// Benchmark the full tracker path including listener fan-out
fn bench_tracker_sensor_changed(c: &mut Criterion) {
    let mut data = PreGeneratedData::new(1000, 7);
    let mut tracker = CompassTracker::new(MockSensorHub::full(), MockLocationProvider::granted());
    tracker.start();

    c.bench_function("tracker_sensor_changed", |b| {
        b.iter(|| {
            let (_, magnetic) = data.next();
            tracker.on_sensor_changed(SensorEvent::new(
                SensorKind::MagneticField,
                black_box(magnetic),
            ))
        })
    });
}

/// Benchmark the great-circle bearing
fn bench_bearing(c: &mut Criterion) {
    let src = Coordinate::new(52.3676, 4.9041);
    let dst = Coordinate::new(40.7128, -74.0060);

    c.bench_function("calculate_bearing", |b| {
        b.iter(|| calculate_bearing(black_box(src), black_box(dst)))
    });
}

criterion_group!(
    benches,
    bench_rotation_matrix,
    bench_filter_update,
    bench_estimator_update,
    bench_tracker_sensor_changed,
    bench_bearing
);

criterion_main!(benches);

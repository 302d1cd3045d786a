use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use compass_core::platform::mock::{MockLocationProvider, MockSensorHub};
use compass_core::{CompassListener, CompassTracker, Coordinate, SensorEvent, SensorKind};
use nalgebra::Vector3;

const SAMPLES: usize = 50;

#[derive(Default)]
struct Dial {
    // f32 bits, so the dial can be read from any thread
    degrees: AtomicU32,
}

impl Dial {
    fn degrees(&self) -> f32 {
        f32::from_bits(self.degrees.load(Ordering::Relaxed))
    }
}

impl CompassListener for Dial {
    fn on_heading(&self, degrees: f32) {
        self.degrees.store(degrees.to_bits(), Ordering::Relaxed);
    }

    fn on_location(&self, coordinate: Coordinate) {
        println!("Location: {}", coordinate);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut tracker = CompassTracker::new(MockSensorHub::full(), MockLocationProvider::granted());
    let dial = Arc::new(Dial::default());
    tracker.add_listener(&dial);
    tracker.start();

    tracker.on_location_changed(Coordinate::new(52.3676, 4.9041));
    if let Err(e) = tracker.set_mark_from_input("40.7128", "-74.0060") {
        eprintln!("Could not set mark: {}", e);
    }

    // Turn slowly from north to east
    for i in 0..SAMPLES {
        let heading = (i as f32 / SAMPLES as f32 * 90.0).to_radians();
        let gravity = Vector3::new(0.0, 0.0, 9.81); // replace with gravity sensor data
        let magnetic = Vector3::new(-22.0 * heading.sin(), 22.0 * heading.cos(), -40.0); // replace with magnetometer data

        tracker.on_sensor_changed(SensorEvent::new(SensorKind::Gravity, gravity));
        tracker.on_sensor_changed(SensorEvent::new(SensorKind::MagneticField, magnetic));

        let angles = tracker.dial_angles();
        println!(
            "Dial: {:7.2}, Mark: {:7.2}",
            dial.degrees(),
            angles.mark.unwrap_or_default()
        );
    }

    tracker.stop();
}

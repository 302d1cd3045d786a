//! Compass Core - heading estimation and bearing calculation for compass apps
//!
//! This library turns raw accelerometer (or gravity) and magnetometer samples
//! into a stable compass heading, and computes the great-circle bearing from
//! the phone's location to a user-chosen mark. Platform glue feeds sensor and
//! location callbacks in and reads smoothed angles back out; drawing is left to
//! the host.
//!
//! # Features
//!
//! - Tilt-compensated rotation matrix from gravity and geomagnetic vectors
//! - Circular exponential smoothing that is safe across the 0°/360° seam
//! - Gravity sensor preferred, raw accelerometer as fallback
//! - Great-circle initial bearing between coordinates
//! - Weakly held listeners with synchronous fan-out
//! - Platform traits for sensors and location with test doubles behind the
//!   `mock` feature
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use compass_core::{HeadingEstimator, SensorEvent, SensorKind, TiltSource};
//!
//! let mut estimator = HeadingEstimator::new();
//! estimator.start(TiltSource::Gravity);
//!
//! // Sensor readings
//! let gravity = Vector3::new(0.0, 0.0, 9.81);     // m/s², lying flat
//! let magnetic = Vector3::new(0.0, 22.0, -40.0);  // µT, top edge facing north
//!
//! estimator.on_sample(SensorEvent::new(SensorKind::Gravity, gravity));
//! let heading = estimator.on_sample(SensorEvent::new(SensorKind::MagneticField, magnetic));
//!
//! // Rotate the dial by the emitted heading to keep north fixed on screen
//! assert!(heading.unwrap().abs() < 1e-3);
//! ```
//!
//! Bearings to a mark:
//!
//! ```rust
//! use compass_core::{Coordinate, calculate_bearing};
//!
//! let bearing = calculate_bearing(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));
//! assert!((bearing - 90.0).abs() < 1e-9);
//! ```

mod bearing;
pub mod compass;
mod error;
mod estimator;
mod filter;
mod listener;
mod math;
pub mod platform;
mod tracker;
mod types;

// Re-export all public types and functions
pub use bearing::calculate_bearing;
pub use compass::calculate_azimuth;
pub use error::{CompassError, Result};
pub use estimator::HeadingEstimator;
pub use filter::{DEFAULT_SMOOTHING_FACTOR, HeadingFilter};
pub use listener::{CompassListener, ListenerSet};
pub use math::{DEG_TO_RAD, RAD_TO_DEG, normalize_degrees};
pub use platform::{LocationProvider, SensorHub};
pub use tracker::CompassTracker;
pub use types::*;

//! Heading estimation from gravity and magnetometer samples

use nalgebra::{Matrix3, Vector3};

use crate::compass::{Orientation, orientation, rotation_matrix};
use crate::filter::HeadingFilter;
use crate::types::{CompassSettings, SensorEvent, SensorKind, TiltSource};

/// Smoothed compass heading estimator
///
/// Keeps the latest tilt (gravity or accelerometer) and magnetic vectors,
/// recomputes the device azimuth whenever either changes, and smooths it with
/// a [`HeadingFilter`]. The emitted heading is negated so a dial rotated by it
/// keeps north fixed on screen.
///
/// Samples only count between [`start`](Self::start) and
/// [`stop`](Self::stop); late callbacks after a stop are ignored.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_core::{HeadingEstimator, SensorEvent, SensorKind, TiltSource};
///
/// let mut estimator = HeadingEstimator::new();
/// estimator.start(TiltSource::Gravity);
///
/// estimator.on_sample(SensorEvent::new(SensorKind::Gravity, Vector3::new(0.0, 0.0, 9.81)));
/// // Device facing east: north lies to its left
/// let heading = estimator
///     .on_sample(SensorEvent::new(SensorKind::MagneticField, Vector3::new(-22.0, 0.0, -40.0)))
///     .unwrap();
/// assert!((heading + 90.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct HeadingEstimator {
    /// Latest gravity or accelerometer vector
    tilt: Vector3<f32>,
    /// Latest magnetometer vector
    magnetic: Vector3<f32>,
    /// Sensor accepted as the tilt reference for this session
    tilt_source: Option<TiltSource>,
    filter: HeadingFilter,
    /// Last successfully computed orientation
    orientation: Option<Orientation>,
    active: bool,
}

impl HeadingEstimator {
    /// Create a stopped estimator with default settings
    pub fn new() -> Self {
        Self::with_settings(CompassSettings::default())
    }

    /// Create a stopped estimator with the given settings
    pub fn with_settings(settings: CompassSettings) -> Self {
        Self {
            tilt: Vector3::zeros(),
            magnetic: Vector3::zeros(),
            tilt_source: None,
            filter: HeadingFilter::new(settings.smoothing_factor),
            orientation: None,
            active: false,
        }
    }

    /// Begin a session using `tilt_source` as the gravity reference
    ///
    /// Starting an active estimator restarts it from zero state.
    pub fn start(&mut self, tilt_source: TiltSource) {
        self.clear();
        self.tilt_source = Some(tilt_source);
        self.active = true;
    }

    /// End the session and reset all sample and smoothing state
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.clear();
        self.tilt_source = None;
        self.active = false;
    }

    /// Feed a sensor sample, returning a new emitted heading when available
    ///
    /// Returns `None` when the estimator is stopped, the sample comes from a
    /// sensor not used this session, or the rotation matrix has no solution.
    pub fn on_sample(&mut self, event: SensorEvent) -> Option<f32> {
        if !self.active {
            return None;
        }

        match event.kind {
            SensorKind::MagneticField => self.magnetic = event.values,
            kind if Some(kind) == self.tilt_source.map(TiltSource::sensor) => {
                self.tilt = event.values
            }
            _ => return None,
        }

        self.update()
    }

    /// Most recent emitted heading in degrees (negated smoothed azimuth)
    pub fn heading(&self) -> f32 {
        -self.filter.heading()
    }

    /// Most recent smoothed azimuth in degrees, `(-180, 180]`
    pub fn smoothed_azimuth(&self) -> f32 {
        self.filter.heading()
    }

    /// Orientation from the last successful rotation matrix
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Rotation matrix for the current sample pair, if one exists
    pub fn rotation_matrix(&self) -> Option<Matrix3<f32>> {
        rotation_matrix(self.tilt, self.magnetic)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn tilt_source(&self) -> Option<TiltSource> {
        self.tilt_source
    }

    pub fn filter(&self) -> &HeadingFilter {
        &self.filter
    }

    fn update(&mut self) -> Option<f32> {
        let Some(rotation) = self.rotation_matrix() else {
            log::trace!("No rotation solution for tilt={:?} magnetic={:?}", self.tilt, self.magnetic);
            return None;
        };

        let orientation = orientation(&rotation);
        self.orientation = Some(orientation);
        let smoothed = self.filter.update(orientation.azimuth_degrees());

        Some(-smoothed)
    }

    fn clear(&mut self) {
        self.tilt = Vector3::zeros();
        self.magnetic = Vector3::zeros();
        self.orientation = None;
        self.filter.reset();
    }
}

impl Default for HeadingEstimator {
    fn default() -> Self {
        Self::new()
    }
}

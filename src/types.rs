//! Core value types and settings for the compass library

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use nalgebra::Vector3;

use crate::error::{CompassError, Result};
use crate::filter::DEFAULT_SMOOTHING_FACTOR;

/// Geographic coordinate in degrees
///
/// Immutable value type. No range validation is performed: out-of-range
/// values are accepted and simply produce mathematically valid bearings.
///
/// # Example
/// ```
/// use compass_core::Coordinate;
///
/// let here = Coordinate::new(52.0, 4.0);
/// assert_eq!(here.latitude(), 52.0);
/// assert_eq!(Coordinate::default(), Coordinate::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Parse a coordinate from separate latitude and longitude text fields
    ///
    /// Surrounding whitespace is ignored. Non-numeric and non-finite values
    /// are rejected.
    ///
    /// # Example
    /// ```
    /// use compass_core::{CompassError, Coordinate};
    ///
    /// let mark = Coordinate::parse(" 51.5", "-0.12").unwrap();
    /// assert_eq!(mark, Coordinate::new(51.5, -0.12));
    ///
    /// assert!(matches!(
    ///     Coordinate::parse("north", "4.0"),
    ///     Err(CompassError::InvalidNumber(_))
    /// ));
    /// ```
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self> {
        Ok(Self::new(
            parse_component(latitude)?,
            parse_component(longitude)?,
        ))
    }
}

fn parse_component(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CompassError::InvalidNumber(trimmed.to_string())),
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Coordinate{{latitude={}, longitude={}}}",
            self.latitude, self.longitude
        )
    }
}

/// Parses `"latitude,longitude"`
impl FromStr for Coordinate {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self> {
        let (latitude, longitude) = s
            .split_once(',')
            .ok_or_else(|| CompassError::MalformedCoordinate(s.to_string()))?;
        Self::parse(latitude, longitude)
    }
}

/// Motion and magnetic sensors the heading estimator consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Raw accelerometer in m/s², including linear acceleration
    Accelerometer,
    /// Low-passed gravity vector in m/s²
    Gravity,
    /// Geomagnetic field in µT
    MagneticField,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Accelerometer,
        SensorKind::Gravity,
        SensorKind::MagneticField,
    ];
}

/// Sensor used as the "down" reference for tilt compensation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TiltSource {
    Gravity,
    Accelerometer,
}

impl TiltSource {
    /// Sensor whose samples feed this tilt source
    pub const fn sensor(self) -> SensorKind {
        match self {
            TiltSource::Gravity => SensorKind::Gravity,
            TiltSource::Accelerometer => SensorKind::Accelerometer,
        }
    }
}

impl From<TiltSource> for SensorKind {
    fn from(source: TiltSource) -> Self {
        source.sensor()
    }
}

/// A single reading delivered by the platform sensor callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorEvent {
    pub kind: SensorKind,
    pub values: Vector3<f32>,
}

impl SensorEvent {
    pub fn new(kind: SensorKind, values: Vector3<f32>) -> Self {
        Self { kind, values }
    }
}

/// Whether a sensor could be subscribed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Unavailable,
    Available,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

impl From<bool> for Availability {
    fn from(available: bool) -> Self {
        if available {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }
}

/// Per-sensor availability, computed once when a session starts
///
/// # Example
/// ```
/// use compass_core::{Availability, SensorAvailability, TiltSource};
///
/// let availability = SensorAvailability {
///     accelerometer: Availability::Available,
///     gravity: Availability::Available,
///     magnetometer: Availability::Available,
/// };
/// // Gravity wins over the raw accelerometer
/// assert_eq!(availability.tilt_source(), Some(TiltSource::Gravity));
/// assert!(availability.is_sufficient());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorAvailability {
    pub accelerometer: Availability,
    pub gravity: Availability,
    pub magnetometer: Availability,
}

impl SensorAvailability {
    /// Sensor used as the "down" reference, preferring gravity
    pub fn tilt_source(&self) -> Option<TiltSource> {
        if self.gravity.is_available() {
            Some(TiltSource::Gravity)
        } else if self.accelerometer.is_available() {
            Some(TiltSource::Accelerometer)
        } else {
            None
        }
    }

    /// True when a heading can be computed at all
    pub fn is_sufficient(&self) -> bool {
        self.tilt_source().is_some() && self.magnetometer.is_available()
    }
}

/// Location update request passed to the platform provider
///
/// Updates arrive when either the interval elapses or the device moves
/// further than the displacement, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRequest {
    /// Minimum time between updates
    pub min_interval: Duration,
    /// Minimum displacement between updates in meters
    pub min_distance_m: f32,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(5000),
            min_distance_m: 10.0,
        }
    }
}

/// Compass settings
///
/// # Example
/// ```
/// use compass_core::{CompassSettings, LocationRequest};
/// use core::time::Duration;
///
/// let settings = CompassSettings {
///     smoothing_factor: 0.9, // Snappier, more jitter
///     location_request: LocationRequest {
///         min_interval: Duration::from_secs(1),
///         ..Default::default()
///     },
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassSettings {
    /// Weight of the previous smoothed state, in `[0, 1)`
    ///
    /// Higher values give more inertia and less jitter at the cost of lag.
    /// 0.97 gives each new sample roughly 3% weight.
    pub smoothing_factor: f32,
    /// Location update cadence requested on start
    pub location_request: LocationRequest,
}

impl Default for CompassSettings {
    fn default() -> Self {
        Self {
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            location_request: LocationRequest::default(),
        }
    }
}

/// Rotation angles for the renderer, in degrees
///
/// `dial` rotates the compass rose; `mark` rotates the bearing marker and
/// already includes the dial rotation. Neither is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DialAngles {
    pub dial: f32,
    pub mark: Option<f32>,
}

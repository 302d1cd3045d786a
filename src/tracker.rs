//! Compass session: sensors, location, mark and listener fan-out

use std::sync::Arc;

use crate::bearing::calculate_bearing;
use crate::error::Result;
use crate::estimator::HeadingEstimator;
use crate::listener::{CompassListener, ListenerSet};
use crate::platform::{LocationProvider, SensorHub};
use crate::types::{
    Availability, CompassSettings, Coordinate, DialAngles, SensorAvailability, SensorEvent,
    SensorKind,
};

/// Compass session driven by platform sensor and location callbacks
///
/// Owns the [`HeadingEstimator`], the latest phone location and the optional
/// mark. The host forwards its callbacks to [`on_sensor_changed`] and
/// [`on_location_changed`]; listeners receive headings, locations and
/// start/stop notifications synchronously.
///
/// The tracker is `Send` whenever its platform types are, so hosts that
/// deliver callbacks on several threads can serialize them behind one
/// `Mutex<CompassTracker<..>>`.
///
/// [`on_sensor_changed`]: Self::on_sensor_changed
/// [`on_location_changed`]: Self::on_location_changed
///
/// # Example
/// ```
/// use std::sync::{Arc, Mutex};
/// use nalgebra::Vector3;
/// use compass_core::{
///     CompassListener, CompassTracker, SensorEvent, SensorKind,
///     platform::mock::{MockLocationProvider, MockSensorHub},
/// };
///
/// #[derive(Default)]
/// struct Dial(Mutex<f32>);
///
/// impl CompassListener for Dial {
///     fn on_heading(&self, degrees: f32) {
///         *self.0.lock().unwrap() = degrees;
///     }
/// }
///
/// let mut tracker = CompassTracker::new(MockSensorHub::full(), MockLocationProvider::granted());
/// let dial = Arc::new(Dial::default());
/// tracker.add_listener(&dial);
/// tracker.start();
///
/// tracker.on_sensor_changed(SensorEvent::new(SensorKind::Gravity, Vector3::new(0.0, 0.0, 9.81)));
/// tracker.on_sensor_changed(SensorEvent::new(SensorKind::MagneticField, Vector3::new(-22.0, 0.0, -40.0)));
/// assert!((*dial.0.lock().unwrap() + 90.0).abs() < 1e-3);
/// ```
#[derive(Debug)]
pub struct CompassTracker<S: SensorHub, L: LocationProvider> {
    settings: CompassSettings,
    sensors: S,
    location_provider: L,
    estimator: HeadingEstimator,
    listeners: ListenerSet,
    availability: Option<SensorAvailability>,
    sensors_unavailable: bool,
    location: Coordinate,
    mark: Option<Coordinate>,
}

impl<S: SensorHub, L: LocationProvider> CompassTracker<S, L> {
    /// Create a stopped tracker with default settings
    pub fn new(sensors: S, location_provider: L) -> Self {
        Self::with_settings(sensors, location_provider, CompassSettings::default())
    }

    /// Create a stopped tracker with the given settings
    pub fn with_settings(sensors: S, location_provider: L, settings: CompassSettings) -> Self {
        Self {
            settings,
            sensors,
            location_provider,
            estimator: HeadingEstimator::with_settings(settings),
            listeners: ListenerSet::new(),
            availability: None,
            sensors_unavailable: false,
            location: Coordinate::default(),
            mark: None,
        }
    }

    pub fn add_listener<T: CompassListener + 'static>(&mut self, listener: &Arc<T>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener<T: CompassListener + 'static>(&mut self, listener: &Arc<T>) -> bool {
        self.listeners.remove(listener)
    }

    /// Subscribe to sensors and location and begin emitting headings
    ///
    /// Starting an active tracker re-subscribes from scratch. When no tilt
    /// sensor or no magnetometer is available the session stops again
    /// immediately and [`sensors_unavailable`](Self::sensors_unavailable)
    /// reports true.
    pub fn start(&mut self) {
        if self.estimator.is_active() {
            self.stop();
        }

        let availability = self.register_sensors();
        self.availability = Some(availability);
        self.sensors_unavailable = !availability.is_sufficient();

        if let Err(e) = self
            .location_provider
            .request_updates(self.settings.location_request)
        {
            log::error!("Location not available: {}", e);
        }

        match availability.tilt_source() {
            Some(tilt_source) if availability.is_sufficient() => {
                self.estimator.start(tilt_source);
                log::info!("Compass started");
                self.listeners.notify(|l| l.on_started());
                log::info!("Sensors are available, tilt source {:?}", tilt_source);
            }
            _ => {
                log::info!("Compass started");
                self.listeners.notify(|l| l.on_started());
                log::error!("Sensors unavailable: {:?}", availability);
                self.shutdown();
            }
        }
    }

    /// Unsubscribe everything and reset the heading state
    ///
    /// Stopping a stopped tracker is a no-op.
    pub fn stop(&mut self) {
        if !self.estimator.is_active() {
            return;
        }
        self.shutdown();
    }

    fn shutdown(&mut self) {
        for kind in SensorKind::ALL {
            self.sensors.unregister(kind);
        }
        if let Err(e) = self.location_provider.remove_updates() {
            log::debug!("Removing location updates failed: {}", e);
        }

        self.estimator.stop();
        log::info!("Compass stopped");
        self.listeners.notify(|l| l.on_stopped());
    }

    /// Platform sensor callback
    pub fn on_sensor_changed(&mut self, event: SensorEvent) {
        if let Some(degrees) = self.estimator.on_sample(event) {
            self.listeners.notify(|l| l.on_heading(degrees));
        }
    }

    /// Platform location callback; ignored while stopped
    pub fn on_location_changed(&mut self, coordinate: Coordinate) {
        if !self.estimator.is_active() {
            return;
        }
        self.location = coordinate;
        log::debug!("Got GPS coordinates: {}", coordinate);
        self.listeners.notify(|l| l.on_location(coordinate));
    }

    pub fn set_mark_coordinate(&mut self, mark: Coordinate) {
        self.mark = Some(mark);
    }

    /// Set the mark from user-entered text
    ///
    /// Invalid input is logged and returned as an error; the current mark is
    /// left unchanged.
    pub fn set_mark_from_input(&mut self, latitude: &str, longitude: &str) -> Result<()> {
        match Coordinate::parse(latitude, longitude) {
            Ok(mark) => {
                self.set_mark_coordinate(mark);
                Ok(())
            }
            Err(e) => {
                log::info!("Invalid mark coordinate: {}", e);
                Err(e)
            }
        }
    }

    pub fn clear_mark(&mut self) {
        self.mark = None;
    }

    pub fn mark(&self) -> Option<Coordinate> {
        self.mark
    }

    /// Bearing from the phone location to the mark in `(-180, 180]` degrees
    ///
    /// Until a location update arrives the phone location is `(0, 0)`.
    pub fn mark_bearing(&self) -> Option<f64> {
        self.mark.map(|mark| calculate_bearing(self.location, mark))
    }

    /// Rotation angles for drawing the dial and the mark indicator
    pub fn dial_angles(&self) -> DialAngles {
        let dial = self.heading();
        DialAngles {
            dial,
            mark: self.mark_bearing().map(|bearing| bearing as f32 + dial),
        }
    }

    /// Most recent emitted heading in degrees
    pub fn heading(&self) -> f32 {
        self.estimator.heading()
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn is_active(&self) -> bool {
        self.estimator.is_active()
    }

    /// Availability computed by the most recent [`start`](Self::start)
    pub fn sensor_availability(&self) -> Option<SensorAvailability> {
        self.availability
    }

    /// True when the last start failed for lack of sensors
    pub fn sensors_unavailable(&self) -> bool {
        self.sensors_unavailable
    }

    pub fn estimator(&self) -> &HeadingEstimator {
        &self.estimator
    }

    pub fn settings(&self) -> CompassSettings {
        self.settings
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn location_provider(&self) -> &L {
        &self.location_provider
    }

    fn register_sensors(&mut self) -> SensorAvailability {
        let availability = SensorAvailability {
            accelerometer: self.sensors.register(SensorKind::Accelerometer),
            magnetometer: self.sensors.register(SensorKind::MagneticField),
            gravity: self.sensors.register(SensorKind::Gravity),
        };

        // Gravity makes the raw accelerometer redundant
        if availability.gravity == Availability::Available {
            self.sensors.unregister(SensorKind::Accelerometer);
        }

        availability
    }
}

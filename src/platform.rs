//! Platform interfaces the compass tracker drives
//!
//! The host application implements these over its sensor and location
//! services. The tracker calls them from one thread at a time.

use crate::error::Result;
use crate::types::{Availability, LocationRequest, SensorKind};

/// Sensor subscription interface
pub trait SensorHub {
    /// Subscribe to `kind`, reporting whether the sensor exists and accepted
    /// the subscription
    fn register(&mut self, kind: SensorKind) -> Availability;

    /// Drop the subscription for `kind`
    ///
    /// Unregistering a sensor that is not subscribed is a no-op.
    fn unregister(&mut self, kind: SensorKind);
}

/// Location update interface
pub trait LocationProvider {
    /// Start delivering location updates
    ///
    /// # Errors
    ///
    /// Returns `CompassError::LocationPermissionDenied` when the user has not
    /// granted location access, or `CompassError::LocationProviderUnavailable`
    /// when the provider is disabled or missing.
    fn request_updates(&mut self, request: LocationRequest) -> Result<()>;

    /// Stop delivering location updates
    fn remove_updates(&mut self) -> Result<()>;
}

/// Sensor hub for hosts without motion sensors
impl SensorHub for () {
    fn register(&mut self, _kind: SensorKind) -> Availability {
        Availability::Unavailable
    }

    fn unregister(&mut self, _kind: SensorKind) {}
}

/// Location provider for hosts without positioning
impl LocationProvider for () {
    fn request_updates(&mut self, _request: LocationRequest) -> Result<()> {
        Err(crate::CompassError::LocationProviderUnavailable(
            "no location provider".to_string(),
        ))
    }

    fn remove_updates(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! Recording platform doubles for tests and demos

    use std::collections::HashSet;

    use super::{LocationProvider, SensorHub};
    use crate::error::{CompassError, Result};
    use crate::types::{Availability, LocationRequest, SensorKind};

    /// Platform call log entry
    #[derive(Debug, Clone, PartialEq)]
    pub enum PlatformCall {
        Register(SensorKind),
        Unregister(SensorKind),
        RequestUpdates(LocationRequest),
        RemoveUpdates,
    }

    /// Mock sensor hub
    ///
    /// Sensors listed as present accept subscriptions; everything else reports
    /// unavailable. All calls are recorded.
    #[derive(Debug, Default)]
    pub struct MockSensorHub {
        present: HashSet<SensorKind>,
        subscribed: HashSet<SensorKind>,
        calls: Vec<PlatformCall>,
    }

    impl MockSensorHub {
        /// Hub with the given sensors present
        pub fn new(present: &[SensorKind]) -> Self {
            Self {
                present: present.iter().copied().collect(),
                ..Default::default()
            }
        }

        /// Hub with accelerometer, gravity and magnetometer present
        pub fn full() -> Self {
            Self::new(&SensorKind::ALL)
        }

        /// Hub with no sensors at all
        pub fn empty() -> Self {
            Self::default()
        }

        pub fn is_subscribed(&self, kind: SensorKind) -> bool {
            self.subscribed.contains(&kind)
        }

        pub fn subscribed(&self) -> &HashSet<SensorKind> {
            &self.subscribed
        }

        pub fn calls(&self) -> &[PlatformCall] {
            &self.calls
        }

        pub fn clear_calls(&mut self) {
            self.calls.clear();
        }
    }

    impl SensorHub for MockSensorHub {
        fn register(&mut self, kind: SensorKind) -> Availability {
            self.calls.push(PlatformCall::Register(kind));
            let present = self.present.contains(&kind);
            if present {
                self.subscribed.insert(kind);
            }
            present.into()
        }

        fn unregister(&mut self, kind: SensorKind) {
            self.calls.push(PlatformCall::Unregister(kind));
            self.subscribed.remove(&kind);
        }
    }

    /// How the mock location provider answers requests
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum LocationAccess {
        #[default]
        Granted,
        PermissionDenied,
        ProviderDisabled,
    }

    /// Mock location provider
    #[derive(Debug, Default)]
    pub struct MockLocationProvider {
        access: LocationAccess,
        active_request: Option<LocationRequest>,
        calls: Vec<PlatformCall>,
    }

    impl MockLocationProvider {
        pub fn new(access: LocationAccess) -> Self {
            Self {
                access,
                ..Default::default()
            }
        }

        pub fn granted() -> Self {
            Self::new(LocationAccess::Granted)
        }

        pub fn active_request(&self) -> Option<LocationRequest> {
            self.active_request
        }

        pub fn calls(&self) -> &[PlatformCall] {
            &self.calls
        }

        fn check_access(&self) -> Result<()> {
            match self.access {
                LocationAccess::Granted => Ok(()),
                LocationAccess::PermissionDenied => Err(CompassError::LocationPermissionDenied),
                LocationAccess::ProviderDisabled => Err(
                    CompassError::LocationProviderUnavailable("gps disabled".to_string()),
                ),
            }
        }
    }

    impl LocationProvider for MockLocationProvider {
        fn request_updates(&mut self, request: LocationRequest) -> Result<()> {
            self.calls.push(PlatformCall::RequestUpdates(request));
            self.check_access()?;
            self.active_request = Some(request);
            Ok(())
        }

        fn remove_updates(&mut self) -> Result<()> {
            self.calls.push(PlatformCall::RemoveUpdates);
            self.check_access()?;
            self.active_request = None;
            Ok(())
        }
    }

}

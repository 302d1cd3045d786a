use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompassError {
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("Expected `latitude,longitude`, got {0:?}")]
    MalformedCoordinate(String),

    #[error("Location permission denied")]
    LocationPermissionDenied,

    #[error("Location provider unavailable: {0}")]
    LocationProviderUnavailable(String),
}

pub type Result<T> = std::result::Result<T, CompassError>;

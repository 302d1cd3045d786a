//! Angle helpers shared by the heading and bearing code

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Wrap an angle in degrees into `[0, 360)`
///
/// # Example
/// ```
/// use compass_core::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(720.0), 0.0);
/// ```
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// `f32` variant of [`normalize_degrees`] for sensor-rate angles
pub(crate) fn normalize_degrees_f32(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

//! Tilt-compensated rotation matrix and device orientation
//!
//! Device axes follow the handset convention: X to the right of the screen,
//! Y towards the top of the screen, Z out of the screen. World axes are
//! East-North-Up.

use nalgebra::{Matrix3, Vector3};

use crate::math::{RAD_TO_DEG, normalize_degrees_f32};

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Below this squared magnitude the tilt vector is treated as free fall
const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * STANDARD_GRAVITY * STANDARD_GRAVITY;

/// Minimum `|magnetic × gravity|` in µT·g for a usable east vector
const MIN_HORIZONTAL_FIELD: f32 = 0.1;

/// Device orientation in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Rotation about -Z, clockwise from magnetic north
    pub azimuth: f32,
    /// Rotation about X
    pub pitch: f32,
    /// Rotation about Y
    pub roll: f32,
}

impl Orientation {
    /// Azimuth in degrees, normalized to `[0, 360)`
    pub fn azimuth_degrees(&self) -> f32 {
        normalize_degrees_f32(self.azimuth * RAD_TO_DEG)
    }
}

/// Compute the device-to-world rotation matrix
///
/// Rows are the world East, North and Up axes expressed in device
/// coordinates. Returns `None` when the inputs are degenerate: the tilt
/// vector is too short (free fall) or the magnetic field is too weak or
/// parallel to gravity for a horizontal component to exist.
///
/// # Arguments
/// * `gravity` - Gravity or raw accelerometer reading in m/s²
/// * `magnetic` - Magnetometer reading in µT
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_core::compass::{orientation, rotation_matrix};
///
/// let gravity = Vector3::new(0.0, 0.0, 9.81);    // Lying flat, screen up
/// let magnetic = Vector3::new(0.0, 22.0, -40.0); // Top edge facing north
///
/// let r = rotation_matrix(gravity, magnetic).unwrap();
/// let heading = orientation(&r).azimuth_degrees();
/// assert!(heading.abs() < 1e-3);
/// ```
pub fn rotation_matrix(gravity: Vector3<f32>, magnetic: Vector3<f32>) -> Option<Matrix3<f32>> {
    let gravity_squared = gravity.magnitude_squared();
    if gravity_squared < FREE_FALL_GRAVITY_SQUARED {
        return None;
    }

    // East = magnetic × gravity
    let east = magnetic.cross(&gravity);
    let east_magnitude = east.magnitude();
    if east_magnitude < MIN_HORIZONTAL_FIELD {
        return None;
    }

    let east = east / east_magnitude;
    let up = gravity / gravity_squared.sqrt();

    // North = up × east, already unit length
    let north = up.cross(&east);

    Some(Matrix3::from_rows(&[
        east.transpose(),
        north.transpose(),
        up.transpose(),
    ]))
}

/// Extract azimuth, pitch and roll from a rotation matrix
pub fn orientation(rotation: &Matrix3<f32>) -> Orientation {
    Orientation {
        azimuth: rotation[(0, 1)].atan2(rotation[(1, 1)]),
        pitch: (-rotation[(2, 1)]).clamp(-1.0, 1.0).asin(),
        roll: (-rotation[(2, 0)]).atan2(rotation[(2, 2)]),
    }
}

/// Raw azimuth in degrees `[0, 360)` for a gravity/magnetic pair
///
/// Convenience wrapper over [`rotation_matrix`] and [`orientation`].
pub fn calculate_azimuth(gravity: Vector3<f32>, magnetic: Vector3<f32>) -> Option<f32> {
    rotation_matrix(gravity, magnetic).map(|r| orientation(&r).azimuth_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: Vector3<f32> = Vector3::new(0.0, 0.0, STANDARD_GRAVITY);

    /// Magnetometer reading for a level device facing `heading` degrees
    fn field_for_heading(heading: f32) -> Vector3<f32> {
        let rad = heading.to_radians();
        Vector3::new(-22.0 * rad.sin(), 22.0 * rad.cos(), -40.0)
    }

    #[test]
    fn test_cardinal_directions() {
        for (heading, expected) in [(0.0, 0.0), (90.0, 90.0), (180.0, 180.0), (270.0, 270.0)] {
            let azimuth = calculate_azimuth(LEVEL, field_for_heading(heading)).unwrap();
            assert!(
                (azimuth - expected).abs() < 1e-3,
                "Heading {}° should give azimuth {}°, got {}",
                heading,
                expected,
                azimuth
            );
        }
    }

    #[test]
    fn test_azimuth_range() {
        for heading in (0..360).step_by(15) {
            let azimuth = calculate_azimuth(LEVEL, field_for_heading(heading as f32)).unwrap();
            assert!(
                (0.0..360.0).contains(&azimuth),
                "Azimuth {:.1}° out of range for heading {}°",
                azimuth,
                heading
            );
        }
    }

    #[test]
    fn test_rotation_matrix_is_orthonormal() {
        let gravity = Vector3::new(1.2, -0.8, 9.6);
        let r = rotation_matrix(gravity, Vector3::new(5.0, 20.0, -38.0)).unwrap();

        let product = r * r.transpose();
        assert!((product - Matrix3::identity()).norm() < 1e-5);
        assert!((r.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_tilt_compensation() {
        let field = field_for_heading(45.0);
        let level = calculate_azimuth(LEVEL, field).unwrap();

        // Pitch the device 30° about its X axis, rotating both vectors with it
        let tilt = nalgebra::Rotation3::from_axis_angle(&Vector3::x_axis(), 30f32.to_radians());
        let tilted = calculate_azimuth(tilt * LEVEL, tilt * field).unwrap();

        assert!(
            (level - tilted).abs() < 0.01,
            "Tilt compensation failed: level={:.2}°, tilted={:.2}°",
            level,
            tilted
        );
    }

    #[test]
    fn test_pitch_and_roll_level() {
        let r = rotation_matrix(LEVEL, field_for_heading(10.0)).unwrap();
        let o = orientation(&r);
        assert!(o.pitch.abs() < 1e-6);
        assert!(o.roll.abs() < 1e-6);
    }

    #[test]
    fn test_free_fall_has_no_solution() {
        let falling = Vector3::new(0.1, 0.2, 0.5);
        assert_eq!(rotation_matrix(falling, field_for_heading(0.0)), None);
        assert_eq!(rotation_matrix(Vector3::zeros(), field_for_heading(0.0)), None);
    }

    #[test]
    fn test_degenerate_field_has_no_solution() {
        // Field parallel to gravity has no horizontal component
        assert_eq!(rotation_matrix(LEVEL, Vector3::new(0.0, 0.0, -45.0)), None);
        // No field at all
        assert_eq!(rotation_matrix(LEVEL, Vector3::zeros()), None);
    }
}

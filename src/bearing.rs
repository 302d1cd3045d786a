//! Great-circle initial bearing between two coordinates

use crate::types::Coordinate;

/// Initial great-circle bearing from `src` to `dst` in degrees
///
/// Uses the spherical bearing formula. Inputs are taken as given, without
/// range normalization. The result lies in `(-180, 180]` and is not wrapped
/// into `[0, 360)`; use [`normalize_degrees`](crate::normalize_degrees) if
/// a compass-style value is needed. Identical coordinates yield 0.
///
/// # Example
/// ```
/// use compass_core::{Coordinate, calculate_bearing};
///
/// let bearing = calculate_bearing(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));
/// assert!((bearing - 90.0).abs() < 1e-9);
///
/// let here = Coordinate::new(52.0, 4.0);
/// assert_eq!(calculate_bearing(here, here), 0.0);
/// ```
pub fn calculate_bearing(src: Coordinate, dst: Coordinate) -> f64 {
    let src_lat = src.latitude().to_radians();
    let dst_lat = dst.latitude().to_radians();
    let delta_lng = (dst.longitude() - src.longitude()).to_radians();

    let y = delta_lng.sin() * dst_lat.cos();
    let x = src_lat.cos() * dst_lat.sin() - src_lat.sin() * dst_lat.cos() * delta_lng.cos();

    // atan2 yields -180 when delta_lng rounds to -pi or is -0.0
    let bearing = y.atan2(x).to_degrees();
    if bearing <= -180.0 { 180.0 } else { bearing }
}

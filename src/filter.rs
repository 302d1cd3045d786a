//! Circular exponential smoothing of compass headings

use crate::math::{DEG_TO_RAD, RAD_TO_DEG};

/// Smoothing factor used when none (or NaN) is configured
pub const DEFAULT_SMOOTHING_FACTOR: f32 = 0.97;

/// Exponential smoothing filter over the sine and cosine of a heading
///
/// Averaging the raw angle breaks at the 0°/360° seam (359° and 1° would
/// average to 180°). Smoothing the unit vector components and recovering the
/// angle with `atan2` keeps the result on the short arc.
///
/// # Example
/// ```
/// use compass_core::HeadingFilter;
///
/// let mut filter = HeadingFilter::new(0.97);
/// for _ in 0..200 {
///     filter.update(359.0);
///     filter.update(1.0);
/// }
/// assert!(filter.heading().abs() < 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeadingFilter {
    /// Weight given to the previous state
    smoothing_factor: f32,
    /// Running sine accumulator
    sin: f32,
    /// Running cosine accumulator
    cos: f32,
    /// Last smoothed heading in degrees, `(-180, 180]`
    heading: f32,
}

impl HeadingFilter {
    /// Create a filter with the given smoothing factor
    ///
    /// The factor is clamped to `[0, 1)`; 1.0 would freeze the output forever.
    /// NaN falls back to [`DEFAULT_SMOOTHING_FACTOR`].
    pub fn new(smoothing_factor: f32) -> Self {
        let smoothing_factor = if smoothing_factor.is_nan() {
            DEFAULT_SMOOTHING_FACTOR
        } else {
            smoothing_factor.clamp(0.0, 1.0 - f32::EPSILON)
        };

        Self {
            smoothing_factor,
            sin: 0.0,
            cos: 0.0,
            heading: 0.0,
        }
    }

    /// Feed a raw heading in degrees and return the smoothed heading
    ///
    /// The result lies in `(-180, 180]`.
    pub fn update(&mut self, raw_degrees: f32) -> f32 {
        let alpha = self.smoothing_factor;
        let (sin, cos) = (raw_degrees * DEG_TO_RAD).sin_cos();

        self.sin = alpha * self.sin + (1.0 - alpha) * sin;
        self.cos = alpha * self.cos + (1.0 - alpha) * cos;
        self.heading = self.sin.atan2(self.cos) * RAD_TO_DEG;

        self.heading
    }

    /// Last smoothed heading in degrees
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Clear the accumulators so the next session starts unbiased
    pub fn reset(&mut self) {
        self.sin = 0.0;
        self.cos = 0.0;
        self.heading = 0.0;
    }

    pub fn smoothing_factor(&self) -> f32 {
        self.smoothing_factor
    }

    /// Current `(sin, cos)` accumulator state
    pub fn accumulators(&self) -> (f32, f32) {
        (self.sin, self.cos)
    }
}

impl Default for HeadingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angular_distance(a: f32, b: f32) -> f32 {
        let diff = (a - b).rem_euclid(360.0);
        diff.min(360.0 - diff)
    }

    #[test]
    fn test_filter_initialization() {
        let filter = HeadingFilter::default();
        assert_eq!(filter.accumulators(), (0.0, 0.0));
        assert_eq!(filter.heading(), 0.0);
        assert_eq!(filter.smoothing_factor(), 0.97);
    }

    #[test]
    fn test_first_sample_sets_direction() {
        // From zero state the first sample fixes the direction exactly
        let mut filter = HeadingFilter::default();
        let heading = filter.update(135.0);
        assert!((heading - 135.0).abs() < 1e-3);
    }

    #[test]
    fn test_convergence_to_constant_heading() {
        for target in [0.0f32, 45.0, 90.0, 179.0, 200.0, 300.0, 359.0] {
            let mut filter = HeadingFilter::default();
            filter.update(target + 120.0);
            for _ in 0..200 {
                filter.update(target);
            }
            assert!(
                angular_distance(filter.heading(), target) < 1.0,
                "Expected convergence to {}°, got {}°",
                target,
                filter.heading()
            );
        }
    }

    #[test]
    fn test_wraparound_smooths_to_north() {
        let mut filter = HeadingFilter::default();
        for i in 0..500 {
            let raw = if i % 2 == 0 { 359.0 } else { 1.0 };
            filter.update(raw);
            // Naive averaging would drift toward 180°
            assert!(filter.heading().abs() < 1.5, "Step {}: {}", i, filter.heading());
        }
    }

    #[test]
    fn test_heavy_smoothing_lags() {
        let mut filter = HeadingFilter::default();
        for _ in 0..200 {
            filter.update(0.0);
        }
        // A single 90° step only nudges the output by a few degrees
        let heading = filter.update(90.0);
        assert!(heading > 0.0 && heading < 5.0, "Got {}", heading);
    }

    #[test]
    fn test_zero_factor_tracks_input() {
        let mut filter = HeadingFilter::new(0.0);
        filter.update(10.0);
        let heading = filter.update(250.0);
        assert!((heading - (-110.0)).abs() < 1e-3);
    }

    #[test]
    fn test_factor_is_clamped() {
        assert!(HeadingFilter::new(1.5).smoothing_factor() < 1.0);
        assert_eq!(HeadingFilter::new(-0.5).smoothing_factor(), 0.0);
        assert_eq!(HeadingFilter::new(f32::INFINITY).smoothing_factor(), 1.0 - f32::EPSILON);
    }

    #[test]
    fn test_nan_factor_uses_default() {
        let mut filter = HeadingFilter::new(f32::NAN);
        assert_eq!(filter.smoothing_factor(), DEFAULT_SMOOTHING_FACTOR);

        for _ in 0..10 {
            assert!(filter.update(45.0).is_finite());
        }
        assert!((filter.heading() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset() {
        let mut filter = HeadingFilter::default();
        for _ in 0..100 {
            filter.update(90.0);
        }
        assert!(filter.accumulators().0 > 0.5);

        filter.reset();
        assert_eq!(filter.accumulators(), (0.0, 0.0));
        assert_eq!(filter.heading(), 0.0);

        // Fresh session converges from zero state, not the prior bias
        let heading = filter.update(270.0);
        assert!((heading - (-90.0)).abs() < 1e-3);
    }
}

//! Color points in three-dimensional component space.
//!
//! A [`ColorPoint`] is the unit of data the clustering engine works on:
//! one pixel's color, plus a derived packed scalar index used for 1-D
//! ordering and binning by the stratified initializer.

use serde::{Deserialize, Serialize};

/// An immutable color value with three components.
///
/// Components are conventionally in `[0, 255]` but stored as `f32` so that
/// cluster means (centroids) are representable without rounding loss.
///
/// # Examples
///
/// ```
/// use cuantizar::color::ColorPoint;
///
/// let a = ColorPoint::new(255.0, 0.0, 0.0);
/// let b = ColorPoint::new(0.0, 0.0, 255.0);
/// assert_eq!(a.squared_distance(&b), 2.0 * 255.0 * 255.0);
/// assert_eq!(a.index(), 0xFF0000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPoint {
    red: f32,
    green: f32,
    blue: f32,
}

impl ColorPoint {
    /// Creates a color point from its three components.
    #[must_use]
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red component.
    #[must_use]
    pub fn red(&self) -> f32 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub fn green(&self) -> f32 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub fn blue(&self) -> f32 {
        self.blue
    }

    /// Returns the packed scalar index of this color.
    ///
    /// Each component is rounded and clamped to `[0, 255]`, then packed as
    /// `(r << 16) | (g << 8) | b`. The index gives colors a total 1-D order
    /// used for interval membership and stratified binning.
    #[must_use]
    pub fn index(&self) -> u32 {
        let quantize = |c: f32| -> u32 { c.round().clamp(0.0, 255.0) as u32 };
        (quantize(self.red) << 16) | (quantize(self.green) << 8) | quantize(self.blue)
    }

    /// Computes the squared Euclidean distance to another color point.
    ///
    /// Symmetric, and zero exactly when both points have equal components.
    #[must_use]
    pub fn squared_distance(&self, other: &Self) -> f32 {
        let dr = self.red - other.red;
        let dg = self.green - other.green;
        let db = self.blue - other.blue;
        dr * dr + dg * dg + db * db
    }

    /// Tests whether this color's packed index lies in the half-open
    /// interval `[low, high)`.
    #[must_use]
    pub fn in_band(&self, low: f64, high: f64) -> bool {
        let index = f64::from(self.index());
        index >= low && index < high
    }
}

/// Returns the minimum and maximum packed index over a set of points.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn index_range(points: &[ColorPoint]) -> Option<(u32, u32)> {
    let first = points.first()?.index();
    let mut min = first;
    let mut max = first;

    for point in &points[1..] {
        let index = point.index();
        min = min.min(index);
        max = max.max(index);
    }

    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_packing() {
        let p = ColorPoint::new(1.0, 2.0, 3.0);
        assert_eq!(p.index(), (1 << 16) | (2 << 8) | 3);
    }

    #[test]
    fn test_index_rounds_and_clamps() {
        // Means land between integer component values
        let p = ColorPoint::new(0.4, 127.6, 300.0);
        assert_eq!(p.index(), (128 << 8) | 255);

        let q = ColorPoint::new(-5.0, 0.0, 0.0);
        assert_eq!(q.index(), 0);
    }

    #[test]
    fn test_squared_distance_symmetric() {
        let a = ColorPoint::new(10.0, 20.0, 30.0);
        let b = ColorPoint::new(13.0, 24.0, 30.0);
        assert_eq!(a.squared_distance(&b), b.squared_distance(&a));
        assert_eq!(a.squared_distance(&b), 25.0);
    }

    #[test]
    fn test_squared_distance_identity() {
        let a = ColorPoint::new(7.0, 7.0, 7.0);
        assert_eq!(a.squared_distance(&a), 0.0);
    }

    #[test]
    fn test_in_band_half_open() {
        let p = ColorPoint::new(0.0, 0.0, 10.0);
        assert!(p.in_band(10.0, 11.0));
        assert!(p.in_band(0.0, 10.5));
        // Upper bound excluded
        assert!(!p.in_band(0.0, 10.0));
        assert!(!p.in_band(10.5, 20.0));
    }

    #[test]
    fn test_index_range() {
        let points = vec![
            ColorPoint::new(0.0, 0.0, 5.0),
            ColorPoint::new(0.0, 1.0, 0.0),
            ColorPoint::new(0.0, 0.0, 1.0),
        ];
        assert_eq!(index_range(&points), Some((1, 256)));
    }

    #[test]
    fn test_index_range_empty() {
        assert_eq!(index_range(&[]), None);
    }

    #[test]
    fn test_index_range_single_point() {
        let points = vec![ColorPoint::new(3.0, 3.0, 3.0)];
        let expected = points[0].index();
        assert_eq!(index_range(&points), Some((expected, expected)));
    }
}

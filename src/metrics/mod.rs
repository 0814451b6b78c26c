//! Evaluation metrics for clustering quality.

use crate::color::ColorPoint;

/// Computes the distortion of a clustering: the total squared distance
/// between every point and its assigned centroid.
///
/// Lower is better; zero means every point sits exactly on its centroid.
///
/// # Examples
///
/// ```
/// use cuantizar::color::ColorPoint;
/// use cuantizar::metrics::distortion;
///
/// let points = vec![ColorPoint::new(0.0, 0.0, 0.0), ColorPoint::new(0.0, 0.0, 2.0)];
/// let centroids = vec![ColorPoint::new(0.0, 0.0, 1.0)];
/// let assignments = vec![0, 0];
///
/// assert_eq!(distortion(&points, &centroids, &assignments), 2.0);
/// ```
#[must_use]
pub fn distortion(points: &[ColorPoint], centroids: &[ColorPoint], assignments: &[usize]) -> f32 {
    points
        .iter()
        .zip(assignments)
        .map(|(point, &cluster)| point.squared_distance(&centroids[cluster]))
        .sum()
}

//! Core traits for the engine's pluggable policies.
//!
//! These traits define the API contracts for centroid initialization and
//! loop termination. The engine takes one implementation of each at
//! construction; it never inspects which variant it was given.

use crate::cluster::ClusterState;
use crate::color::ColorPoint;
use crate::error::Result;

/// Capability for selecting the initial K centroids.
///
/// Implementations draw from an explicitly owned random generator so runs
/// are reproducible under a fixed seed; they never touch process-global
/// randomness.
///
/// # Examples
///
/// ```
/// use cuantizar::color::ColorPoint;
/// use cuantizar::init::UniformSampling;
/// use cuantizar::traits::Initializer;
///
/// let points = vec![
///     ColorPoint::new(0.0, 0.0, 0.0),
///     ColorPoint::new(10.0, 10.0, 10.0),
///     ColorPoint::new(20.0, 20.0, 20.0),
/// ];
///
/// let init = UniformSampling::new().with_random_state(42);
/// let centroids = init.select_initial_centroids(&points, 2).unwrap();
/// assert_eq!(centroids.len(), 2);
/// ```
pub trait Initializer {
    /// Selects `k` initial centroids from the point set.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy cannot produce `k` centroids from
    /// the given points (empty input, or a degenerate packed-index range
    /// for stratified sampling).
    fn select_initial_centroids(&self, points: &[ColorPoint], k: usize) -> Result<Vec<ColorPoint>>;
}

/// Capability for deciding when the iteration loop stops.
///
/// The engine calls this once per iteration, after the end-of-iteration
/// centroid snapshot has been captured.
pub trait ConvergenceCriterion {
    /// Returns true when the run should terminate.
    fn has_converged(&self, state: &ClusterState<'_>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convergence::Stability;
    use crate::init::{StratifiedSampling, UniformSampling};

    fn sample_points() -> Vec<ColorPoint> {
        vec![
            ColorPoint::new(0.0, 0.0, 0.0),
            ColorPoint::new(0.0, 0.0, 64.0),
            ColorPoint::new(0.0, 0.0, 128.0),
            ColorPoint::new(0.0, 0.0, 255.0),
        ]
    }

    #[test]
    fn test_initializers_are_object_safe() {
        let strategies: Vec<Box<dyn Initializer>> = vec![
            Box::new(UniformSampling::new().with_random_state(1)),
            Box::new(StratifiedSampling::new().with_random_state(1)),
        ];

        for strategy in &strategies {
            let centroids = strategy
                .select_initial_centroids(&sample_points(), 2)
                .expect("selection succeeds");
            assert_eq!(centroids.len(), 2);
        }
    }

    #[test]
    fn test_criterion_is_object_safe() {
        let _criterion: Box<dyn ConvergenceCriterion> = Box::new(Stability::new(1e-4, 100));
    }
}

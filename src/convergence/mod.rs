//! Convergence strategies for the iteration loop.

use crate::cluster::ClusterState;
use crate::traits::ConvergenceCriterion;

/// Stability-based stopping rule.
///
/// Measures the mean squared displacement between the start-of-iteration
/// and end-of-iteration centroid snapshots, averaged over K. The run stops
/// once the mean falls to or below the threshold, or the iteration cap is
/// reached.
///
/// Both values are fixed for the criterion's lifetime, supplied at
/// construction.
#[derive(Debug, Clone)]
pub struct Stability {
    /// Displacement threshold under which centroids count as stable.
    threshold: f32,
    /// Maximum number of iterations.
    max_iter: usize,
}

impl Stability {
    /// Creates a stability criterion with the given threshold and
    /// iteration cap.
    #[must_use]
    pub fn new(threshold: f32, max_iter: usize) -> Self {
        Self {
            threshold,
            max_iter,
        }
    }

    /// Returns the displacement threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns the iteration cap.
    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Mean squared displacement between the iteration's centroid
    /// snapshots.
    fn mean_displacement(state: &ClusterState<'_>) -> f32 {
        let total: f32 = state
            .centroids_start()
            .iter()
            .zip(state.centroids_end())
            .map(|(start, end)| start.squared_distance(end))
            .sum();

        total / state.k() as f32
    }
}

impl Default for Stability {
    fn default() -> Self {
        Self::new(1e-4, 300)
    }
}

impl ConvergenceCriterion for Stability {
    fn has_converged(&self, state: &ClusterState<'_>) -> bool {
        Self::mean_displacement(state) <= self.threshold || state.iteration() >= self.max_iter
    }
}

//! The iterative clustering engine.
//!
//! Implements Lloyd's algorithm over [`ColorPoint`]s, parameterized by an
//! [`Initializer`] for centroid seeding and a [`ConvergenceCriterion`] for
//! loop termination.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::ColorPoint;
use crate::convergence::Stability;
use crate::error::{CuantizarError, Result};
use crate::init::UniformSampling;
use crate::metrics::distortion;
use crate::traits::{ConvergenceCriterion, Initializer};

/// Working state of one clustering run.
///
/// Holds the input points, the start-of-iteration and end-of-iteration
/// centroid snapshots, the per-point assignment table, and the iteration
/// counter. Created once per run, mutated in place each iteration, and
/// discarded at termination; only the final centroids and assignments
/// escape the engine.
///
/// The two snapshots are explicit values rotated per iteration: the start
/// snapshot is captured before the update step and compared against the new
/// centroids after it, never the reverse.
pub struct ClusterState<'a> {
    points: &'a [ColorPoint],
    centroids_start: Vec<ColorPoint>,
    centroids_end: Vec<ColorPoint>,
    assignments: Vec<usize>,
    iteration: usize,
}

impl<'a> ClusterState<'a> {
    pub(crate) fn new(points: &'a [ColorPoint], centroids: Vec<ColorPoint>) -> Self {
        let assignments = vec![0; points.len()];
        Self {
            points,
            centroids_start: centroids.clone(),
            centroids_end: centroids,
            assignments,
            iteration: 0,
        }
    }

    /// Rotates the previous end-of-iteration snapshot into the start slot.
    pub(crate) fn begin_iteration(&mut self) {
        self.centroids_start.clone_from(&self.centroids_end);
    }

    /// Records the iteration's outcome and advances the counter.
    pub(crate) fn complete_iteration(
        &mut self,
        centroids: Vec<ColorPoint>,
        assignments: Vec<usize>,
    ) {
        self.centroids_end = centroids;
        self.assignments = assignments;
        self.iteration += 1;
    }

    /// Returns the input points of the run.
    #[must_use]
    pub fn points(&self) -> &[ColorPoint] {
        self.points
    }

    /// Returns the centroids captured at the start of the iteration.
    #[must_use]
    pub fn centroids_start(&self) -> &[ColorPoint] {
        &self.centroids_start
    }

    /// Returns the centroids captured at the end of the iteration.
    #[must_use]
    pub fn centroids_end(&self) -> &[ColorPoint] {
        &self.centroids_end
    }

    /// Returns the per-point assignment table (point index → centroid
    /// index).
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Returns the number of completed iterations.
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns the number of clusters. Fixed for the whole run.
    #[must_use]
    pub fn k(&self) -> usize {
        self.centroids_end.len()
    }
}

/// K-Means clustering engine for color points.
///
/// # Algorithm
///
/// 1. Seed K centroids via the injected initialization strategy
/// 2. Assign each point to the nearest centroid by squared distance
/// 3. Replace each centroid with the mean of its assigned points
/// 4. Repeat until the convergence criterion signals termination
///
/// # Examples
///
/// ```
/// use cuantizar::prelude::*;
///
/// let points = vec![
///     ColorPoint::new(0.0, 0.0, 0.0),
///     ColorPoint::new(0.0, 0.0, 1.0),
///     ColorPoint::new(10.0, 10.0, 10.0),
///     ColorPoint::new(10.0, 10.0, 11.0),
/// ];
///
/// let mut kmeans = KMeans::new(2)
///     .with_initializer(UniformSampling::new().with_random_state(42));
/// kmeans.fit(&points).expect("Fit succeeds with valid input");
///
/// assert_eq!(kmeans.centroids().len(), 2);
/// assert_eq!(kmeans.assignments().len(), 4);
/// ```
///
/// # Performance
///
/// - Time complexity: O(nki) where n=points, k=clusters, i=iterations
/// - Space complexity: O(n + k)
pub struct KMeans {
    /// Number of clusters.
    n_clusters: usize,
    /// Centroid seeding strategy.
    initializer: Box<dyn Initializer>,
    /// Stopping rule.
    convergence: Box<dyn ConvergenceCriterion>,
    /// Cluster centroids after fitting.
    centroids: Option<Vec<ColorPoint>>,
    /// Assignment table for the fitted points.
    assignments: Option<Vec<usize>>,
    /// Total squared distance from points to their centroids.
    distortion: f32,
    /// Number of iterations run.
    n_iter: usize,
}

impl KMeans {
    /// Creates a new engine with the specified number of clusters.
    ///
    /// Defaults to uniform random initialization and the stability
    /// criterion (threshold 1e-4, 300 iterations).
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            initializer: Box::new(UniformSampling::new()),
            convergence: Box::new(Stability::default()),
            centroids: None,
            assignments: None,
            distortion: 0.0,
            n_iter: 0,
        }
    }

    /// Sets the initialization strategy.
    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Initializer + 'static) -> Self {
        self.initializer = Box::new(initializer);
        self
    }

    /// Sets the convergence criterion.
    #[must_use]
    pub fn with_convergence(mut self, convergence: impl ConvergenceCriterion + 'static) -> Self {
        self.convergence = Box::new(convergence);
        self
    }

    /// Returns the cluster centroids.
    ///
    /// # Panics
    ///
    /// Panics if the engine is not fitted.
    #[must_use]
    pub fn centroids(&self) -> &[ColorPoint] {
        self.centroids
            .as_deref()
            .expect("Engine not fitted. Call fit() first.")
    }

    /// Returns the point → centroid assignment table.
    ///
    /// # Panics
    ///
    /// Panics if the engine is not fitted.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        self.assignments
            .as_deref()
            .expect("Engine not fitted. Call fit() first.")
    }

    /// Returns the total squared distance from points to their assigned
    /// centroids.
    #[must_use]
    pub fn distortion(&self) -> f32 {
        self.distortion
    }

    /// Returns the number of iterations run.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns true if the engine has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.centroids.is_some()
    }

    /// Returns the fitted centroid colors as a [`Palette`].
    ///
    /// # Panics
    ///
    /// Panics if the engine is not fitted.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::new(self.centroids().to_vec())
    }

    /// Runs the clustering loop over the given points.
    ///
    /// # Errors
    ///
    /// Returns an error before any iteration begins if:
    /// - no points were supplied
    /// - `k` is zero or exceeds the number of points
    /// - the initialization strategy rejects the input
    pub fn fit(&mut self, points: &[ColorPoint]) -> Result<()> {
        if points.is_empty() {
            return Err(CuantizarError::EmptyInput);
        }
        if self.n_clusters == 0 {
            return Err(CuantizarError::invalid_hyperparameter(
                "k",
                self.n_clusters,
                "k >= 1",
            ));
        }
        if self.n_clusters > points.len() {
            return Err(CuantizarError::invalid_hyperparameter(
                "k",
                self.n_clusters,
                "k <= number of points",
            ));
        }

        let centroids = self
            .initializer
            .select_initial_centroids(points, self.n_clusters)?;
        let mut state = ClusterState::new(points, centroids);

        loop {
            state.begin_iteration();

            let assignments = assign_points(points, state.centroids_start());
            let centroids = update_centroids(points, &assignments, state.centroids_start());

            state.complete_iteration(centroids, assignments);

            if self.convergence.has_converged(&state) {
                break;
            }
        }

        self.distortion = distortion(points, state.centroids_end(), state.assignments());
        self.n_iter = state.iteration;
        self.centroids = Some(state.centroids_end);
        self.assignments = Some(state.assignments);

        Ok(())
    }
}

/// Assigns every point to its nearest centroid.
///
/// Each point's scan is independent, so the step runs in parallel against
/// the immutable centroid snapshot.
fn assign_points(points: &[ColorPoint], centroids: &[ColorPoint]) -> Vec<usize> {
    points
        .par_iter()
        .map(|point| nearest_centroid(point, centroids))
        .collect()
}

/// Index of the centroid nearest to the point. Ties go to the lowest
/// centroid index.
fn nearest_centroid(point: &ColorPoint, centroids: &[ColorPoint]) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;

    for (index, centroid) in centroids.iter().enumerate() {
        let distance = point.squared_distance(centroid);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }

    best
}

/// Recomputes each centroid as the component-wise mean of its assigned
/// points. A centroid with no assigned points keeps its previous value.
fn update_centroids(
    points: &[ColorPoint],
    assignments: &[usize],
    previous: &[ColorPoint],
) -> Vec<ColorPoint> {
    let k = previous.len();
    let mut sums = vec![[0.0f32; 3]; k];
    let mut counts = vec![0usize; k];

    for (point, &cluster) in points.iter().zip(assignments) {
        counts[cluster] += 1;
        sums[cluster][0] += point.red();
        sums[cluster][1] += point.green();
        sums[cluster][2] += point.blue();
    }

    (0..k)
        .map(|cluster| {
            if counts[cluster] == 0 {
                previous[cluster]
            } else {
                let n = counts[cluster] as f32;
                ColorPoint::new(
                    sums[cluster][0] / n,
                    sums[cluster][1] / n,
                    sums[cluster][2] / n,
                )
            }
        })
        .collect()
}

/// A fitted set of representative colors.
///
/// Serializable so a computed palette can be stored and reapplied to other
/// rasters.
///
/// # Examples
///
/// ```
/// use cuantizar::cluster::Palette;
/// use cuantizar::color::ColorPoint;
///
/// let palette = Palette::new(vec![ColorPoint::new(0.0, 0.0, 0.0)]);
/// assert_eq!(palette.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<ColorPoint>,
}

impl Palette {
    /// Creates a palette from centroid colors.
    #[must_use]
    pub fn new(colors: Vec<ColorPoint>) -> Self {
        Self { colors }
    }

    /// Returns the palette colors.
    #[must_use]
    pub fn colors(&self) -> &[ColorPoint] {
        &self.colors
    }

    /// Returns the number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette holds no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Saves the palette as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a palette from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or deserialization fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

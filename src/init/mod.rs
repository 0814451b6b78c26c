//! Centroid initialization strategies.
//!
//! Two [`Initializer`] variants are provided: uniform random sampling over
//! all points, and stratified sampling over the packed color-index range.
//! Both own their randomness through an optional seed; no process-global
//! generator is ever consulted.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::color::{index_range, ColorPoint};
use crate::error::{CuantizarError, Result};
use crate::traits::Initializer;

fn make_rng(random_state: Option<u64>) -> StdRng {
    match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn check_k(points: &[ColorPoint], k: usize) -> Result<()> {
    if points.is_empty() {
        return Err(CuantizarError::EmptyInput);
    }
    if k == 0 {
        return Err(CuantizarError::invalid_hyperparameter("k", k, "k >= 1"));
    }
    if k > points.len() {
        return Err(CuantizarError::invalid_hyperparameter(
            "k",
            k,
            "k <= number of points",
        ));
    }
    Ok(())
}

/// Uniform random sampling of initial centroids.
///
/// Shuffles the point indices with a uniform distribution and takes the
/// first K, so no index is ever selected twice (sampling without
/// replacement).
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
///     ColorPoint::new(128.0, 128.0, 128.0),
///     ColorPoint::new(255.0, 255.0, 255.0),
/// ];
///
/// let init = UniformSampling::new().with_random_state(7);
/// let centroids = init.select_initial_centroids(&points, 3).unwrap();
/// assert_eq!(centroids.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UniformSampling {
    /// Random seed for reproducibility.
    random_state: Option<u64>,
}

impl UniformSampling {
    /// Creates a uniform sampling strategy with entropy-based seeding.
    #[must_use]
    pub fn new() -> Self {
        Self { random_state: None }
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }
}

impl Initializer for UniformSampling {
    fn select_initial_centroids(&self, points: &[ColorPoint], k: usize) -> Result<Vec<ColorPoint>> {
        check_k(points, k)?;

        let mut rng = make_rng(self.random_state);
        let mut indices: Vec<usize> = (0..points.len()).collect();
        indices.shuffle(&mut rng);

        Ok(indices.into_iter().take(k).map(|i| points[i]).collect())
    }
}

/// Stratified sampling of initial centroids over the packed color index.
///
/// The packed-index range is split into K contiguous equal-width strata.
/// Every point is bucketed into its stratum, a cumulative distribution is
/// built from the relative stratum sizes, and each of the K draws is mapped
/// through the inverse CDF to a stratum before one of its points is picked
/// uniformly at random. Empty strata contribute zero-width bands and are
/// never selected.
///
/// # Errors
///
/// Selection fails when the computed stratum width is not positive, i.e.
/// when every point shares one packed index.
#[derive(Debug, Clone, Default)]
pub struct StratifiedSampling {
    /// Random seed for reproducibility.
    random_state: Option<u64>,
}

impl StratifiedSampling {
    /// Creates a stratified sampling strategy with entropy-based seeding.
    #[must_use]
    pub fn new() -> Self {
        Self { random_state: None }
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }
}

impl Initializer for StratifiedSampling {
    fn select_initial_centroids(&self, points: &[ColorPoint], k: usize) -> Result<Vec<ColorPoint>> {
        check_k(points, k)?;

        let strata = bucket_by_index(points, k)?;
        let distribution = cumulative_distribution(&strata, points.len());

        let mut rng = make_rng(self.random_state);
        let mut selected = Vec::with_capacity(k);

        for _ in 0..k {
            let draw: f64 = rng.gen();
            let stratum = &strata[band_for(draw, &distribution, &strata)];
            selected.push(stratum[rng.gen_range(0..stratum.len())]);
        }

        Ok(selected)
    }
}

/// Buckets every point into one of `k` equal-width strata on the packed
/// index range.
///
/// Strata are half-open `[low, high)`; the last stratum's upper bound is
/// raised past the maximum index so the top point is not dropped.
fn bucket_by_index(points: &[ColorPoint], k: usize) -> Result<Vec<Vec<ColorPoint>>> {
    let (min, max) = index_range(points).ok_or(CuantizarError::EmptyInput)?;
    let width = f64::from(max - min) / k as f64;

    if width <= 0.0 {
        return Err(CuantizarError::invalid_hyperparameter(
            "stratum width",
            width,
            "a positive width: points must span more than one packed index",
        ));
    }

    let origin = f64::from(min);
    let strata = (0..k)
        .map(|i| {
            let low = origin + width * i as f64;
            let high = if i == k - 1 {
                f64::from(max) + 1.0
            } else {
                low + width
            };
            points
                .iter()
                .filter(|point| point.in_band(low, high))
                .copied()
                .collect()
        })
        .collect();

    Ok(strata)
}

/// Builds the cumulative probability distribution over stratum weights.
///
/// Monotone non-decreasing; the final entry accumulates to 1.0.
fn cumulative_distribution(strata: &[Vec<ColorPoint>], total: usize) -> Vec<f64> {
    let mut accumulated = 0.0;
    strata
        .iter()
        .map(|stratum| {
            accumulated += stratum.len() as f64 / total as f64;
            accumulated
        })
        .collect()
}

/// Maps a uniform draw in `[0, 1)` to a stratum index via the inverse CDF:
/// the first cumulative entry that reaches the draw.
fn band_for(draw: f64, distribution: &[f64], strata: &[Vec<ColorPoint>]) -> usize {
    let mut band = distribution
        .iter()
        .position(|&cumulative| cumulative >= draw)
        .unwrap_or(distribution.len() - 1);

    // A draw landing exactly on a zero-width band falls through to the
    // next populated stratum.
    while strata[band].is_empty() && band + 1 < strata.len() {
        band += 1;
    }

    band
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread_points() -> Vec<ColorPoint> {
        vec![
            ColorPoint::new(0.0, 0.0, 0.0),
            ColorPoint::new(0.0, 0.0, 32.0),
            ColorPoint::new(0.0, 0.0, 64.0),
            ColorPoint::new(0.0, 0.0, 128.0),
            ColorPoint::new(0.0, 0.0, 192.0),
            ColorPoint::new(0.0, 0.0, 255.0),
        ]
    }

    #[test]
    fn test_uniform_selects_k_points() {
        let init = UniformSampling::new().with_random_state(42);
        let centroids = init
            .select_initial_centroids(&spread_points(), 3)
            .expect("selection succeeds");
        assert_eq!(centroids.len(), 3);
    }

    #[test]
    fn test_uniform_without_replacement() {
        // With k equal to the point count, a shuffle-take-k selection must
        // return every point exactly once.
        let points = spread_points();
        let init = UniformSampling::new().with_random_state(42);
        let mut selected: Vec<u32> = init
            .select_initial_centroids(&points, points.len())
            .expect("selection succeeds")
            .iter()
            .map(ColorPoint::index)
            .collect();
        selected.sort_unstable();

        let mut expected: Vec<u32> = points.iter().map(ColorPoint::index).collect();
        expected.sort_unstable();

        assert_eq!(selected, expected);
    }

    #[test]
    fn test_uniform_deterministic_under_seed() {
        let points = spread_points();
        let a = UniformSampling::new()
            .with_random_state(7)
            .select_initial_centroids(&points, 3)
            .expect("selection succeeds");
        let b = UniformSampling::new()
            .with_random_state(7)
            .select_initial_centroids(&points, 3)
            .expect("selection succeeds");
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_empty_input() {
        let init = UniformSampling::new();
        assert!(init.select_initial_centroids(&[], 2).is_err());
    }

    #[test]
    fn test_uniform_k_exceeds_points() {
        let init = UniformSampling::new().with_random_state(0);
        let result = init.select_initial_centroids(&spread_points(), 10);
        assert!(result.is_err());
    }

    #[test]
    fn test_stratified_selects_k_points() {
        let init = StratifiedSampling::new().with_random_state(42);
        let centroids = init
            .select_initial_centroids(&spread_points(), 3)
            .expect("selection succeeds");
        assert_eq!(centroids.len(), 3);
    }

    #[test]
    fn test_stratified_deterministic_under_seed() {
        let points = spread_points();
        let a = StratifiedSampling::new()
            .with_random_state(99)
            .select_initial_centroids(&points, 4)
            .expect("selection succeeds");
        let b = StratifiedSampling::new()
            .with_random_state(99)
            .select_initial_centroids(&points, 4)
            .expect("selection succeeds");
        assert_eq!(a, b);
    }

    #[test]
    fn test_stratified_degenerate_width() {
        // Every point has the same packed index, so width = 0
        let points = vec![ColorPoint::new(5.0, 5.0, 5.0); 4];
        let init = StratifiedSampling::new().with_random_state(0);
        let result = init.select_initial_centroids(&points, 2);
        assert!(matches!(
            result,
            Err(CuantizarError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_buckets_cover_every_point() {
        let points = spread_points();
        let strata = bucket_by_index(&points, 4).expect("bucketing succeeds");
        let bucketed: usize = strata.iter().map(Vec::len).sum();
        assert_eq!(bucketed, points.len());
    }

    #[test]
    fn test_max_index_point_is_kept() {
        let points = spread_points();
        let strata = bucket_by_index(&points, 3).expect("bucketing succeeds");
        let top = points.iter().map(ColorPoint::index).max().unwrap();
        let last = strata.last().unwrap();
        assert!(last.iter().any(|p| p.index() == top));
    }

    #[test]
    fn test_distribution_monotone_and_complete() {
        let points = spread_points();
        let strata = bucket_by_index(&points, 4).expect("bucketing succeeds");
        let distribution = cumulative_distribution(&strata, points.len());

        for window in distribution.windows(2) {
            assert!(window[1] >= window[0]);
        }
        assert!((distribution.last().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_for_skips_empty_strata() {
        // Strata: [populated, empty, populated]
        let strata = vec![
            vec![ColorPoint::new(0.0, 0.0, 0.0)],
            vec![],
            vec![ColorPoint::new(0.0, 0.0, 255.0)],
        ];
        let distribution = cumulative_distribution(&strata, 2);

        // The empty middle band has zero width; any draw must land on a
        // populated stratum.
        for &draw in &[0.0, 0.25, 0.5, 0.75, 0.999] {
            let band = band_for(draw, &distribution, &strata);
            assert!(!strata[band].is_empty(), "draw {draw} chose empty band");
        }
    }

    #[test]
    fn test_stratified_empty_input() {
        let init = StratifiedSampling::new();
        assert!(matches!(
            init.select_initial_centroids(&[], 2),
            Err(CuantizarError::EmptyInput)
        ));
    }
}

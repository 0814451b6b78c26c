//! Cuantizar: K-means color quantization in pure Rust.
//!
//! Cuantizar groups an image's pixels into K clusters by color similarity
//! and replaces each pixel with its cluster's representative color. The
//! clustering engine is parameterized by two pluggable policies: how the
//! initial centroids are chosen and how the loop decides to stop.
//!
//! # Quick Start
//!
//! ```
//! use cuantizar::prelude::*;
//!
//! // Two tight color groups
//! let points = vec![
//!     ColorPoint::new(0.0, 0.0, 0.0),
//!     ColorPoint::new(0.0, 0.0, 1.0),
//!     ColorPoint::new(10.0, 10.0, 10.0),
//!     ColorPoint::new(10.0, 10.0, 11.0),
//! ];
//!
//! let mut kmeans = KMeans::new(2)
//!     .with_initializer(UniformSampling::new().with_random_state(42))
//!     .with_convergence(Stability::new(1e-4, 300));
//! kmeans.fit(&points).unwrap();
//!
//! assert_eq!(kmeans.centroids().len(), 2);
//! assert_eq!(kmeans.assignments().len(), 4);
//! ```
//!
//! # Modules
//!
//! - [`color`]: the `ColorPoint` value type and packed-index helpers
//! - [`cluster`]: the clustering engine, its working state, and `Palette`
//! - [`init`]: initialization strategies (uniform and stratified sampling)
//! - [`convergence`]: stopping rules (centroid stability)
//! - [`raster`]: in-memory raster boundary and palette substitution
//! - [`metrics`]: clustering quality measures (distortion)
//! - [`traits`]: the `Initializer` and `ConvergenceCriterion` seams
//! - [`error`]: crate error type and `Result` alias

pub mod cluster;
pub mod color;
pub mod convergence;
pub mod error;
pub mod init;
pub mod metrics;
pub mod prelude;
pub mod raster;
pub mod traits;

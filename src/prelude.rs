//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use cuantizar::prelude::*;
//! ```

pub use crate::cluster::{ClusterState, KMeans, Palette};
pub use crate::color::ColorPoint;
pub use crate::convergence::Stability;
pub use crate::error::{CuantizarError, Result};
pub use crate::init::{StratifiedSampling, UniformSampling};
pub use crate::metrics::distortion;
pub use crate::raster::Raster;
pub use crate::traits::{ConvergenceCriterion, Initializer};

//! In-memory raster boundary for the clustering engine.
//!
//! A [`Raster`] is a width × height grid of [`ColorPoint`]s in row-major
//! order. Decoding and encoding image files is left to the caller; this
//! module only flattens pixels into points for the engine and substitutes
//! the fitted palette back into a new raster.

use serde::{Deserialize, Serialize};

use crate::color::ColorPoint;
use crate::error::{CuantizarError, Result};

/// A rectangular grid of color points, stored row-major.
///
/// # Examples
///
/// ```
/// use cuantizar::color::ColorPoint;
/// use cuantizar::raster::Raster;
///
/// let raster = Raster::new(2, 1, vec![
///     ColorPoint::new(0.0, 0.0, 0.0),
///     ColorPoint::new(255.0, 255.0, 255.0),
/// ]).unwrap();
///
/// assert_eq!(raster.width(), 2);
/// assert_eq!(raster.points().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster {
    width: usize,
    height: usize,
    points: Vec<ColorPoint>,
}

impl Raster {
    /// Creates a raster from its dimensions and row-major pixel points.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count does not equal
    /// `width * height`.
    pub fn new(width: usize, height: usize, points: Vec<ColorPoint>) -> Result<Self> {
        if points.len() != width * height {
            return Err(CuantizarError::invalid_hyperparameter(
                "points",
                points.len(),
                format!("width * height = {}", width * height).as_str(),
            ));
        }
        Ok(Self {
            width,
            height,
            points,
        })
    }

    /// Returns the raster width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixels as a flat point sequence, row-major.
    #[must_use]
    pub fn points(&self) -> &[ColorPoint] {
        &self.points
    }

    /// Converts a (row, column) position to a flat pixel offset.
    #[must_use]
    pub fn offset_of(&self, row: usize, column: usize) -> usize {
        row * self.width + column
    }

    /// Converts a flat pixel offset to its (row, column) position.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        (offset / self.width, offset % self.width)
    }

    /// Builds the reduced-palette raster: every pixel is replaced by the
    /// color of its assigned centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment table length differs from the
    /// pixel count, or if an assignment refers past the centroid set.
    pub fn apply_palette(
        &self,
        centroids: &[ColorPoint],
        assignments: &[usize],
    ) -> Result<Raster> {
        if assignments.len() != self.points.len() {
            return Err(CuantizarError::invalid_hyperparameter(
                "assignments",
                assignments.len(),
                "one entry per pixel",
            ));
        }

        let points = assignments
            .iter()
            .map(|&cluster| {
                centroids
                    .get(cluster)
                    .copied()
                    .ok_or_else(|| {
                        CuantizarError::invalid_hyperparameter(
                            "assignment",
                            cluster,
                            "a centroid index in range",
                        )
                    })
            })
            .collect::<Result<Vec<ColorPoint>>>()?;

        Raster::new(self.width, self.height, points)
    }
}

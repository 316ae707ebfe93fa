//! Bilinear interpolation over the oil/carbon price grid.
//!
//! Evaluation points outside the grid are linearly extrapolated from the
//! outermost cell. This mirrors the behaviour the grid runs were designed
//! around; points a long way outside the modelled domain (e.g. zero oil
//! price, or carbon prices of $10000/tCO2) may give nonsensical results,
//! which the metamodel cleans up afterwards.

use ndarray::ArrayView2;

use crate::errors::{AviationError, AviationResult};

/// Bilinear interpolator over two ascending axes.
///
/// The value array passed to [`GridInterpolator::at`] is indexed
/// `[x axis point][y axis point]`.
#[derive(Debug, Clone)]
pub struct GridInterpolator {
    x_axis: Vec<f64>,
    y_axis: Vec<f64>,
}

impl GridInterpolator {
    /// Build an interpolator, checking both axes are strictly ascending
    /// with at least two points.
    pub fn new(x_axis: &[f64], y_axis: &[f64]) -> AviationResult<Self> {
        for axis in [x_axis, y_axis] {
            let ascending = axis.len() >= 2 && axis.windows(2).all(|w| w[0] < w[1]);
            if !ascending {
                return Err(AviationError::InvalidAxis(axis.to_vec()));
            }
        }
        Ok(Self {
            x_axis: x_axis.to_vec(),
            y_axis: y_axis.to_vec(),
        })
    }

    /// Interpolate `values` at `(x, y)`, extrapolating beyond the axis ends.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have shape `(x_axis.len(), y_axis.len())`.
    pub fn at(&self, values: ArrayView2<'_, f64>, x: f64, y: f64) -> f64 {
        assert_eq!(
            values.dim(),
            (self.x_axis.len(), self.y_axis.len()),
            "value grid shape must match the axes"
        );

        let (i, tx) = cell_coordinate(&self.x_axis, x);
        let (j, ty) = cell_coordinate(&self.y_axis, y);

        let f00 = values[(i, j)];
        let f10 = values[(i + 1, j)];
        let f01 = values[(i, j + 1)];
        let f11 = values[(i + 1, j + 1)];

        (1.0 - tx) * (1.0 - ty) * f00
            + tx * (1.0 - ty) * f10
            + (1.0 - tx) * ty * f01
            + tx * ty * f11
    }
}

/// Locate the grid cell for `target` and the fractional coordinate within it.
///
/// The cell index is clamped to the outermost interval, so the fractional
/// coordinate falls outside `[0, 1]` when the target is beyond the axis and
/// the surrounding bilinear weights extrapolate the edge gradient.
fn cell_coordinate(axis: &[f64], target: f64) -> (usize, f64) {
    let upper = axis.partition_point(|v| *v <= target);
    let i = upper.saturating_sub(1).min(axis.len() - 2);
    let span = axis[i + 1] - axis[i];
    let t = if span > 0.0 {
        (target - axis[i]) / span
    } else {
        0.0
    };
    (i, t)
}

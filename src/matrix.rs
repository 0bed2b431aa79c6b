//! Dense matrix inversion, the computation the cache is typically used with.

use crate::{cell::CacheCell, error::InvertError, lazy};
use nalgebra::DMatrix;

/// A cache cell holding a matrix and, once computed, its inverse.
pub type CacheMatrix = CacheCell<DMatrix<f64>>;

/// The 0x0 matrix, used where no source matrix is given.
pub fn empty() -> DMatrix<f64> {
    DMatrix::zeros(0, 0)
}

/// Settings for [`Inversion::invert`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inversion {
    /// A matrix is treated as singular when its smallest LU pivot, in absolute value, is at or
    /// below `tolerance` times its largest absolute entry.
    pub tolerance: f64,
}

impl Default for Inversion {
    fn default() -> Self {
        Inversion { tolerance: 1e-12 }
    }
}

impl Inversion {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn invert(&self, matrix: &DMatrix<f64>) -> Result<DMatrix<f64>, InvertError> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(InvertError::NotSquare { rows, cols });
        }
        if matrix.is_empty() {
            return Err(InvertError::Empty);
        }
        if !matrix.iter().all(|v| v.is_finite()) {
            return Err(InvertError::NonFinite);
        }

        let scale = matrix.amax();
        let lu = matrix.clone().lu();
        let determinant = lu.determinant();
        let min_pivot = lu.u().diagonal().amin();
        if min_pivot <= self.tolerance * scale {
            tracing::debug!(min_pivot, scale, rows, "refusing to invert singular matrix");
            return Err(InvertError::Singular { determinant });
        }
        lu.try_inverse().ok_or(InvertError::Singular { determinant })
    }
}

/// Invert `matrix` with the default [`Inversion`] settings.
pub fn invert(matrix: &DMatrix<f64>) -> Result<DMatrix<f64>, InvertError> {
    Inversion::default().invert(matrix)
}

/// Return the inverse of the cell's matrix, computing it only if it isn't cached yet.
pub fn cache_solve(cell: &mut CacheMatrix) -> Result<DMatrix<f64>, InvertError> {
    lazy::try_resolve(cell, invert)
}

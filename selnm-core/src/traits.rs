use num_traits::{Num, NumAssignOps};
use std::fmt::Debug;

/// Numeric element type usable inside a [`DenseMatrix`](crate::DenseMatrix).
///
/// Implemented for every type providing the arithmetic (`+ - * /` and their
/// compound forms), ordering and a zero/one pair, so `f32`, `f64` and the
/// primitive integers all qualify.
pub trait Scalar: Num + NumAssignOps + Copy + PartialOrd + Debug {
    /// Absolute difference `|self - other|`.
    ///
    /// Computed without `abs()` so unsigned types never underflow.
    fn abs_difference(self, other: Self) -> Self {
        if self > other {
            self - other
        } else {
            other - self
        }
    }
}

impl<T> Scalar for T where T: Num + NumAssignOps + Copy + PartialOrd + Debug {}

/// Generic trait representing a matrix shape.
pub trait Matrix: Debug {
    /// The underlying numeric type of the matrix elements (e.g., f32, f64).
    type Value: Scalar;

    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Total number of cells, `rows * cols`.
    fn len(&self) -> usize {
        let (rows, cols) = self.dims();
        rows * cols
    }

    /// Checks if the matrix has no cells (zero rows or zero columns).
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }
}

use crate::error::{Result, SelnmError};
use crate::traits::{Matrix, Scalar};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

/// Represents a dense matrix stored in row-major order on the CPU.
///
/// The shape is fixed at construction. Cell `(row, col)` lives at flat index
/// `row * cols + col`.
///
/// Two access paths exist:
/// * checked: [`at`](Self::at), [`at_mut`](Self::at_mut), [`at_flat`](Self::at_flat),
///   [`at_flat_mut`](Self::at_flat_mut) return [`SelnmError::OutOfRange`];
/// * unchecked: `m[i]`, `m[(row, col)]` and the `unsafe` [`get_unchecked`](Self::get_unchecked)
///   pair skip the shape checks for tight loops. Out-of-range use is unspecified:
///   the `Index` impls panic when the flat offset leaves the buffer but silently
///   address a neighbouring cell when only `col` overflows, and `get_unchecked`
///   is undefined behaviour.
///
/// Not internally synchronized; share across threads only behind the caller's own lock.
#[derive(Debug, Clone)]
pub struct DenseMatrix<T: Scalar> {
    rows: usize,
    cols: usize,
    data: Vec<T>, // Data stored row-major: data[row * cols + col]
}

impl<T: Scalar> DenseMatrix<T> {
    /// Creates a new DenseMatrix from raw data, dimensions, assuming row-major order.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(SelnmError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        log::trace!("Created {}x{} matrix from data", rows, cols);
        Ok(Self { rows, cols, data })
    }

    /// Creates a new DenseMatrix with every cell set to `value`.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`, like `Vec` does on capacity overflow.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        let len = match rows.checked_mul(cols) {
            Some(len) => len,
            None => panic!("matrix shape ({}x{}) overflows capacity", rows, cols),
        };
        log::trace!("Created {}x{} matrix filled with {:?}", rows, cols, value);
        Self {
            rows,
            cols,
            data: vec![value; len],
        }
    }

    /// Creates a new DenseMatrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    /// Returns a slice view of the underlying data vector.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable slice view of the underlying data vector.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(SelnmError::OutOfRange(format!(
                "indices ({},{}), max({},{})",
                row, col, self.rows, self.cols
            )));
        }
        Ok(self.offset(row, col))
    }

    fn check_flat(&self, index: usize) -> Result<usize> {
        if index >= self.data.len() {
            return Err(SelnmError::OutOfRange(format!(
                "flat index {}, length {}",
                index,
                self.data.len()
            )));
        }
        Ok(index)
    }

    /// Gets the element at the specified row and column (immutable).
    pub fn at(&self, row: usize, col: usize) -> Result<&T> {
        let offset = self.check_cell(row, col)?;
        Ok(&self.data[offset])
    }

    /// Gets the element at the specified row and column (mutable).
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        let offset = self.check_cell(row, col)?;
        Ok(&mut self.data[offset])
    }

    /// Gets the element at a row-major flat index (immutable).
    pub fn at_flat(&self, index: usize) -> Result<&T> {
        let index = self.check_flat(index)?;
        Ok(&self.data[index])
    }

    /// Gets the element at a row-major flat index (mutable).
    pub fn at_flat_mut(&mut self, index: usize) -> Result<&mut T> {
        let index = self.check_flat(index)?;
        Ok(&mut self.data[index])
    }

    /// Returns the element at `(row, col)` without any bounds check.
    ///
    /// # Safety
    /// `row * cols + col` must be less than `rows * cols`.
    #[inline]
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &T {
        let offset = self.offset(row, col);
        // SAFETY: the caller guarantees the offset is inside the buffer.
        unsafe { self.data.get_unchecked(offset) }
    }

    /// Mutable counterpart of [`get_unchecked`](Self::get_unchecked).
    ///
    /// # Safety
    /// `row * cols + col` must be less than `rows * cols`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, row: usize, col: usize) -> &mut T {
        let offset = self.offset(row, col);
        // SAFETY: the caller guarantees the offset is inside the buffer.
        unsafe { self.data.get_unchecked_mut(offset) }
    }

    /// Compares shape, then every cell.
    ///
    /// With `tolerance` of `None` (or a non-positive value) cells must be exactly
    /// equal, otherwise `|lhs - rhs| <= tolerance` must hold for each cell.
    /// Stops at the first mismatching cell.
    pub fn approx_eq(&self, other: &Self, tolerance: Option<T>) -> bool {
        if self.dims() != other.dims() {
            return false;
        }
        match tolerance.filter(|tol| *tol > T::zero()) {
            None => self.data.iter().zip(&other.data).all(|(a, b)| a == b),
            Some(tol) => self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| a.abs_difference(b) <= tol),
        }
    }

    /// Adds `value` to every cell in place.
    pub fn add_scalar(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|d| *d += value);
        self
    }

    /// Subtracts `value` from every cell in place.
    pub fn sub_scalar(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|d| *d -= value);
        self
    }

    /// Multiplies every cell by `value` in place.
    pub fn mul_scalar(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|d| *d *= value);
        self
    }

    /// Divides every cell by `value` in place.
    pub fn div_scalar(&mut self, value: T) -> &mut Self {
        self.data.iter_mut().for_each(|d| *d /= value);
        self
    }

    /// Element-wise `self += rhs`. Both matrices must have the same shape.
    pub fn add_assign_matrix(&mut self, rhs: &Self) -> Result<&mut Self> {
        if self.dims() != rhs.dims() {
            return Err(SelnmError::IncompatibleShape {
                operation: "add",
                lhs: self.dims(),
                rhs: rhs.dims(),
            });
        }
        for (d, r) in self.data.iter_mut().zip(&rhs.data) {
            *d += *r;
        }
        Ok(self)
    }

    /// Element-wise sum returned as a new matrix; operands are untouched.
    pub fn add_matrix(&self, rhs: &Self) -> Result<Self> {
        let mut result = self.clone();
        result.add_assign_matrix(rhs)?;
        Ok(result)
    }

    /// Matrix product `self * rhs`.
    ///
    /// An `m x n` matrix times an `n x q` matrix gives a freshly allocated
    /// `m x q` matrix, accumulated with `k` ascending from zero.
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        let (m, n) = self.dims();
        let (p, q) = rhs.dims();
        if n != p {
            return Err(SelnmError::IncompatibleShape {
                operation: "multiply",
                lhs: (m, n),
                rhs: (p, q),
            });
        }
        log::trace!("Multiplying ({},{}) by ({},{})", m, n, p, q);
        let mut result = Self::zeros(m, q);
        for i in 0..m {
            for j in 0..q {
                let mut acc = T::zero();
                for k in 0..p {
                    acc += self.data[self.offset(i, k)] * rhs.data[rhs.offset(k, j)];
                }
                result.data[i * q + j] = acc;
            }
        }
        Ok(result)
    }
}

/// Shape-aware comparison with optional tolerance; see [`DenseMatrix::approx_eq`].
pub fn equal<T: Scalar>(lhs: &DenseMatrix<T>, rhs: &DenseMatrix<T>, tolerance: Option<T>) -> bool {
    lhs.approx_eq(rhs, tolerance)
}

impl<T: Scalar> PartialEq for DenseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, None)
    }
}

impl<T: Scalar> Index<usize> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: Scalar> IndexMut<usize> for DenseMatrix<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: Scalar> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

// Scalar operators: compound forms mutate in place, binary forms work on a copy.
macro_rules! impl_scalar_op {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, $method:ident) => {
        impl<T: Scalar> $assign<T> for DenseMatrix<T> {
            fn $assign_fn(&mut self, rhs: T) {
                self.$method(rhs);
            }
        }

        impl<T: Scalar> $op<T> for DenseMatrix<T> {
            type Output = DenseMatrix<T>;

            fn $op_fn(mut self, rhs: T) -> Self::Output {
                self.$method(rhs);
                self
            }
        }

        impl<T: Scalar> $op<T> for &DenseMatrix<T> {
            type Output = DenseMatrix<T>;

            fn $op_fn(self, rhs: T) -> Self::Output {
                $op::$op_fn(self.clone(), rhs)
            }
        }
    };
}

impl_scalar_op!(Add, add, AddAssign, add_assign, add_scalar);
impl_scalar_op!(Sub, sub, SubAssign, sub_assign, sub_scalar);
impl_scalar_op!(Mul, mul, MulAssign, mul_assign, mul_scalar);
impl_scalar_op!(Div, div, DivAssign, div_assign, div_scalar);

// Implement the generic Matrix trait
impl<T: Scalar> Matrix for DenseMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    // rows(), cols(), is_square() are provided by default impls in the trait
}

#[cfg(test)]
mod tests {
    use super::{equal, DenseMatrix};
    use crate::{Matrix, SelnmError};

    #[test]
    fn test_dense_matrix_new_valid() {
        let matrix = DenseMatrix::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(matrix.dims(), (3, 2));
        assert_eq!(matrix[0], 1.0);
        assert_eq!(matrix[(0, 1)], 2.0);
        assert_eq!(matrix[(1, 0)], 3.0);
        assert_eq!(matrix[(2, 1)], 6.0);
    }

    #[test]
    fn test_dense_matrix_new_shape_mismatch() {
        let matrix = DenseMatrix::new(2, 2, vec![1.0f32, 2.0, 3.0]);
        match matrix {
            Err(SelnmError::ShapeMismatch { rows, cols, len }) => {
                assert_eq!((rows, cols, len), (2, 2, 3))
            }
            _ => panic!("Expected ShapeMismatch error"),
        }
        assert!(DenseMatrix::new(2, 2, vec![0i32; 5]).is_err());
    }

    #[test]
    fn test_dense_matrix_new_overflowing_shape() {
        let half = usize::MAX / 2 + 1;
        let matrix = DenseMatrix::<f64>::new(half, 2, vec![]);
        match matrix {
            Err(SelnmError::ShapeMismatch { rows, cols, len }) => {
                assert_eq!((rows, cols, len), (half, 2, 0))
            }
            _ => panic!("Expected ShapeMismatch error"),
        }
        assert!(DenseMatrix::new(usize::MAX, usize::MAX, vec![1.0f32]).is_err());
    }

    #[test]
    #[should_panic(expected = "overflows capacity")]
    fn test_dense_matrix_filled_overflowing_shape_panics() {
        let _ = DenseMatrix::filled(usize::MAX, 2, 0u8);
    }

    #[test]
    fn test_dense_matrix_empty_shape() {
        let matrix: DenseMatrix<f64> = DenseMatrix::zeros(0, 4);
        assert_eq!(matrix.dims(), (0, 4));
        assert!(matrix.is_empty());
        assert!(!matrix.is_square());
        assert!(matrix.at(0, 0).is_err());
        assert!(matrix.at_flat(0).is_err());
    }

    #[test]
    fn test_dense_matrix_at_mut_updates_cell() {
        let mut matrix = DenseMatrix::filled(2, 3, 0i64);
        *matrix.at_mut(1, 2).unwrap() = 7;
        *matrix.at_flat_mut(1).unwrap() = 3;
        assert_eq!(matrix.data(), &[0, 3, 0, 0, 0, 7]);
        matrix.data_mut()[0] = -1;
        assert_eq!(*matrix.at(0, 0).unwrap(), -1);
        assert!(matrix.at_mut(2, 0).is_err());
        assert!(matrix.at_flat_mut(6).is_err());
    }

    #[test]
    fn test_dense_matrix_unchecked_access() {
        let mut matrix = DenseMatrix::new(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        unsafe {
            *matrix.get_unchecked_mut(1, 0) = 9;
            assert_eq!(*matrix.get_unchecked(1, 0), 9);
        }
        // Column overflow lands on the next row.
        assert_eq!(matrix[(0, 2)], 9);
    }

    #[test]
    fn test_equal_tolerance_ignored_when_not_positive() {
        let a = DenseMatrix::filled(2, 2, 1.0);
        let mut b = a.clone();
        b[3] = 1.5;
        assert!(!equal(&a, &b, Some(0.0)));
        assert!(!equal(&a, &b, Some(-1.0)));
        assert!(equal(&a, &b, Some(0.5)));
        assert!(!equal(&a, &b, Some(0.25)));
    }

    #[test]
    fn test_equal_unsigned_tolerance() {
        let a = DenseMatrix::new(1, 2, vec![5u32, 1]).unwrap();
        let b = DenseMatrix::new(1, 2, vec![3u32, 2]).unwrap();
        assert!(equal(&a, &b, Some(2)));
        assert!(!equal(&a, &b, Some(1)));
    }

    #[test]
    fn test_scalar_ops_chain() {
        let mut matrix = DenseMatrix::filled(2, 2, 2.0f64);
        matrix.add_scalar(1.0).mul_scalar(4.0).sub_scalar(2.0).div_scalar(5.0);
        assert_eq!(matrix, DenseMatrix::filled(2, 2, 2.0));
    }

    #[test]
    fn test_binary_scalar_op_leaves_operand() {
        let matrix = DenseMatrix::filled(2, 2, 3i32);
        let doubled = &matrix * 2;
        assert_eq!(doubled, DenseMatrix::filled(2, 2, 6));
        assert_eq!(matrix, DenseMatrix::filled(2, 2, 3));
    }

    #[test]
    fn test_add_assign_matrix_shape_checked() {
        let mut a = DenseMatrix::filled(2, 3, 1.0f32);
        let b = DenseMatrix::filled(3, 2, 1.0f32);
        match a.add_assign_matrix(&b) {
            Err(SelnmError::IncompatibleShape { operation, lhs, rhs }) => {
                assert_eq!(operation, "add");
                assert_eq!(lhs, (2, 3));
                assert_eq!(rhs, (3, 2));
            }
            _ => panic!("Expected IncompatibleShape error"),
        }
        // Failed addition leaves the matrix untouched.
        assert_eq!(a, DenseMatrix::filled(2, 3, 1.0f32));
    }

    #[test]
    fn test_matmul_empty_inner_dimension() {
        let a: DenseMatrix<f64> = DenseMatrix::zeros(2, 0);
        let b: DenseMatrix<f64> = DenseMatrix::zeros(0, 3);
        let c = a.matmul(&b).unwrap();
        assert_eq!(c, DenseMatrix::zeros(2, 3));
    }
}

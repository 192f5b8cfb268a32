//! Dense complex matrices.
//!
//! [`Matrix`] is value-semantic: every operation returns a new matrix and
//! the only in-place mutation (`set`) is crate-private.

use std::fmt;
use std::ops::Mul;

use approx::AbsDiffEq;
use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;
use tracing::trace;

use crate::complex::Complex;
use crate::error::{Result, SimError};

/// A dense 2-D matrix of [`Complex`] values indexed `[row, column]`.
///
/// Always rectangular with at least one row and one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<Complex>,
}

impl Matrix {
    /// All-zero matrix.
    ///
    /// # Panics
    /// Panics if `rows` or `columns` is zero.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        assert!(
            rows > 0 && columns > 0,
            "matrix dimensions must be positive, got {}x{}",
            rows,
            columns
        );
        Matrix {
            data: Array2::from_elem((rows, columns), Complex::ZERO),
        }
    }

    /// Identity matrix of size `dim x dim`.
    pub fn identity(dim: usize) -> Self {
        let mut m = Matrix::zeros(dim, dim);
        for i in 0..dim {
            m.data[[i, i]] = Complex::ONE;
        }
        m
    }

    /// Builds a matrix from explicit rows; dimensions are taken from the data.
    pub fn from_rows(rows: Vec<Vec<Complex>>) -> Result<Self> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(SimError::EmptyMatrix);
        }
        let mut flat = Vec::with_capacity(rows.len() * columns);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(SimError::RaggedMatrix {
                    row: r,
                    expected: columns,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let n = rows.len();
        Ok(Matrix {
            data: Array2::from_shape_fn((n, columns), |(r, c)| flat[r * columns + c]),
        })
    }

    /// Builds a matrix from real-valued rows. Used for the gate constants.
    pub(crate) fn from_real(rows: &[&[f64]]) -> Self {
        let columns = rows[0].len();
        Matrix {
            data: Array2::from_shape_fn((rows.len(), columns), |(r, c)| {
                Complex::from_real(rows[r][c])
            }),
        }
    }

    /// Wraps an existing array.
    ///
    /// # Panics
    /// Panics if the array has a zero-length axis.
    pub fn from_array(data: Array2<Complex>) -> Self {
        assert!(
            data.nrows() > 0 && data.ncols() > 0,
            "matrix dimensions must be positive, got {}x{}",
            data.nrows(),
            data.ncols()
        );
        Matrix { data }
    }

    /// Column vector holding `values`.
    pub fn column_vector(values: &[Complex]) -> Result<Self> {
        if values.is_empty() {
            return Err(SimError::EmptyMatrix);
        }
        Ok(Matrix {
            data: Array2::from_shape_fn((values.len(), 1), |(r, _)| values[r]),
        })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn get(&self, r: usize, c: usize) -> Complex {
        self.data[[r, c]]
    }

    pub(crate) fn set(&mut self, r: usize, c: usize, value: Complex) {
        self.data[[r, c]] = value;
    }

    /// Row `r` as an ordered sequence of length `columns()`.
    pub fn row(&self, r: usize) -> Vec<Complex> {
        self.data.row(r).to_vec()
    }

    /// Column `c` as an ordered sequence of length `rows()`.
    pub fn column(&self, c: usize) -> Vec<Complex> {
        self.data.column(c).to_vec()
    }

    pub fn as_array(&self) -> &Array2<Complex> {
        &self.data
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }

    /// Number of qubits a square operator of this size acts on.
    pub fn num_qubits(&self) -> Result<usize> {
        let (rows, cols) = self.dim();
        if rows != cols {
            return Err(SimError::NonSquare { rows, cols });
        }
        if !rows.is_power_of_two() {
            return Err(SimError::NotPowerOfTwo { dim: rows });
        }
        Ok(rows.trailing_zeros() as usize)
    }

    /// Every element multiplied by `scalar`.
    pub fn scale(&self, scalar: Complex) -> Matrix {
        Matrix {
            data: self.data.mapv(|c| scalar * c),
        }
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Matrix {
        Matrix {
            data: self.data.t().mapv(|c| c.conj()),
        }
    }

    /// Whether `M† M` is the identity within `epsilon`.
    pub fn is_unitary(&self, epsilon: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let product = self.dagger().mul_rows(self, false);
        product.abs_diff_eq(&Matrix::identity(self.rows()), epsilon)
    }

    /// Matrix product `self * rhs`, computing output rows in parallel.
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_product(rhs)?;
        Ok(self.mul_rows(rhs, true))
    }

    /// Matrix product `self * rhs` on the calling thread.
    pub fn try_mul_serial(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_product(rhs)?;
        Ok(self.mul_rows(rhs, false))
    }

    fn check_product(&self, rhs: &Matrix) -> Result<()> {
        if self.columns() != rhs.rows() {
            return Err(SimError::DimensionMismatch {
                operation: "matrix multiplication",
                left: self.dim(),
                right: rhs.dim(),
            });
        }
        Ok(())
    }

    /// Each output row depends only on its index and the two inputs, so rows
    /// are independent tasks. `collect` joins them all before returning.
    fn mul_rows(&self, rhs: &Matrix, parallel: bool) -> Matrix {
        trace!(
            left_rows = self.rows(),
            left_cols = self.columns(),
            right_cols = rhs.columns(),
            parallel,
            "matrix multiplication"
        );
        let a = self.data.mapv(|c| c.to_complex64());
        let b = rhs.data.mapv(|c| c.to_complex64());
        let (rows, cols) = (self.rows(), rhs.columns());

        let product: Vec<Vec<Complex>> = if parallel {
            (0..rows)
                .into_par_iter()
                .map(|r| product_row(&a, &b, r))
                .collect()
        } else {
            (0..rows).map(|r| product_row(&a, &b, r)).collect()
        };

        Matrix {
            data: Array2::from_shape_fn((rows, cols), |(r, c)| product[r][c]),
        }
    }

    /// Kronecker product `self ⊗ other`.
    ///
    /// Output `(r, c)` reads block `(r / other.rows, c / other.columns)` of
    /// `self` and entry `(r % other.rows, c % other.columns)` of `other`, so
    /// `self` supplies the most significant index bits.
    pub fn tensor(&self, other: &Matrix) -> Matrix {
        let (br, bc) = other.dim();
        let shape = (self.rows() * br, self.columns() * bc);
        Matrix {
            data: Array2::from_shape_fn(shape, |(r, c)| {
                self.data[[r / br, c / bc]] * other.data[[r % br, c % bc]]
            }),
        }
    }

    /// Left-to-right Kronecker product of every matrix in `matrices`.
    pub fn tensor_all<'a, It>(matrices: It) -> Result<Matrix>
    where
        It: IntoIterator<Item = &'a Matrix>,
    {
        let mut iter = matrices.into_iter();
        let first = iter.next().ok_or(SimError::EmptyMatrix)?.clone();
        Ok(iter.fold(first, |acc, m| acc.tensor(m)))
    }
}

fn product_row(a: &Array2<Complex64>, b: &Array2<Complex64>, r: usize) -> Vec<Complex> {
    (0..b.ncols())
        .map(|c| {
            let sum: Complex64 = (0..a.ncols()).map(|i| a[[r, i]] * b[[i, c]]).sum();
            Complex::from(sum)
        })
        .collect()
}

/// # Panics
/// Panics on a dimension mismatch; use [`Matrix::try_mul`] to handle it.
impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        match self.try_mul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Mul<Complex> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Complex) -> Matrix {
        self.scale(rhs)
    }
}

impl Mul<&Matrix> for Complex {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs.scale(self)
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        Complex::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        for (r, row) in self.data.rows().into_iter().enumerate() {
            write!(f, "{}", if r == 0 { "[[ " } else { " [ " })?;
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            write!(f, "{} ]", cells.join(", "))?;
            if r + 1 == rows {
                write!(f, "]")?;
            } else {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

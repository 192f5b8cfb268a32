use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::{Result, SimError};
use crate::matrix::Matrix;

/// Persisted form of a matrix: rows of polar pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixData {
    pub mat: Vec<Vec<ComplexData>>,
}

/// Persisted form of one element. `phase` is in units of π.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexData {
    pub magnitude: f64,
    pub phase: f64,
}

impl From<Complex> for ComplexData {
    fn from(c: Complex) -> Self {
        ComplexData {
            magnitude: c.magnitude(),
            phase: c.phase(),
        }
    }
}

impl From<ComplexData> for Complex {
    fn from(d: ComplexData) -> Self {
        Complex::new(d.magnitude, d.phase)
    }
}

impl From<&Matrix> for MatrixData {
    fn from(m: &Matrix) -> Self {
        let mat: Vec<Vec<ComplexData>> = m
            .as_array()
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&c| ComplexData::from(c)).collect())
            .collect();
        MatrixData { mat }
    }
}

impl TryFrom<MatrixData> for Matrix {
    type Error = SimError;

    fn try_from(data: MatrixData) -> Result<Self> {
        let rows: Vec<Vec<Complex>> = data
            .mat
            .into_iter()
            .map(|row| row.into_iter().map(Complex::from).collect())
            .collect();
        Matrix::from_rows(rows)
    }
}

/// Serialize a matrix to a pretty-printed JSON string.
pub fn matrix_to_json(matrix: &Matrix) -> Result<String> {
    Ok(serde_json::to_string_pretty(&MatrixData::from(matrix))?)
}

/// Deserialize a matrix from a JSON string.
pub fn matrix_from_json(json: &str) -> Result<Matrix> {
    let data: MatrixData = serde_json::from_str(json)?;
    Matrix::try_from(data)
}

mod common;

use approx::assert_abs_diff_eq;
use qirby::gate::{CX, H, I, SWAP, X, Z};
use qirby::{Complex, Matrix, SimError};

use common::c;

fn sample_matrix(rows: usize, cols: usize, seed: f64) -> Matrix {
    let data = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|col| c(seed + r as f64 * 0.5 - col as f64, 0.25 * (r + col) as f64 - seed))
                .collect()
        })
        .collect();
    Matrix::from_rows(data).unwrap()
}

#[test]
fn test_zeros_shape() {
    let m = Matrix::zeros(3, 2);
    assert_eq!(m.dim(), (3, 2));
    assert_eq!(m.rows(), 3);
    assert_eq!(m.columns(), 2);
    assert!(m.as_array().iter().all(|&v| v == Complex::ZERO));
}

#[test]
#[should_panic(expected = "matrix dimensions must be positive")]
fn test_zeros_rejects_empty() {
    Matrix::zeros(0, 2);
}

#[test]
fn test_from_rows_validates() {
    assert!(matches!(Matrix::from_rows(vec![]), Err(SimError::EmptyMatrix)));
    assert!(matches!(Matrix::from_rows(vec![vec![]]), Err(SimError::EmptyMatrix)));
    let ragged = Matrix::from_rows(vec![vec![Complex::ONE, Complex::ONE], vec![Complex::ONE]]);
    assert!(matches!(
        ragged,
        Err(SimError::RaggedMatrix { row: 1, expected: 2, actual: 1 })
    ));
}

#[test]
fn test_row_and_column_access() {
    let m = Matrix::from_rows(vec![
        vec![Complex::ONE, Complex::I, Complex::ZERO],
        vec![Complex::NEG_ONE, Complex::NEG_I, Complex::ONE],
    ])
    .unwrap();
    assert_eq!(m.row(1), vec![Complex::NEG_ONE, Complex::NEG_I, Complex::ONE]);
    assert_eq!(m.column(1), vec![Complex::I, Complex::NEG_I]);
    assert_eq!(m.get(0, 1), Complex::I);
    assert_eq!(m.row(0).len(), m.columns());
    assert_eq!(m.column(2).len(), m.rows());
}

#[test]
fn test_clone_is_independent() {
    let a = X.clone();
    let b = a.scale(Complex::I);
    assert_eq!(a, *X);
    assert_ne!(a, b);
}

#[test]
fn test_scalar_multiplication_both_sides() {
    let left = Complex::I * &*X;
    let right = &*X * Complex::I;
    assert_eq!(left, right);
    assert_eq!(left.get(0, 1), Complex::I);
    assert_eq!(left.get(0, 0), Complex::ZERO);
}

#[test]
fn test_multiplication_dimension_mismatch() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);
    let err = a.try_mul(&b).unwrap_err();
    assert!(matches!(
        err,
        SimError::DimensionMismatch { left: (2, 3), right: (2, 3), .. }
    ));
    assert!(a.try_mul_serial(&b).is_err());
}

#[test]
#[should_panic(expected = "mismatched matrices")]
fn test_mul_operator_panics_on_mismatch() {
    let _ = &Matrix::zeros(2, 3) * &Matrix::zeros(2, 3);
}

#[test]
fn test_multiplication_shape_and_values() {
    // [[1, i], [0, 1]] * [[1], [i]] = [[1 + i*i], [i]] = [[0], [i]]
    let a = Matrix::from_rows(vec![
        vec![Complex::ONE, Complex::I],
        vec![Complex::ZERO, Complex::ONE],
    ])
    .unwrap();
    let v = Matrix::column_vector(&[Complex::ONE, Complex::I]).unwrap();
    let out = a.try_mul(&v).unwrap();
    assert_eq!(out.dim(), (2, 1));
    assert_abs_diff_eq!(out.get(0, 0), Complex::ZERO, epsilon = 1e-12);
    assert_abs_diff_eq!(out.get(1, 0), Complex::I, epsilon = 1e-12);
}

#[test]
fn test_parallel_matches_serial() {
    let a = sample_matrix(7, 5, 0.3);
    let b = sample_matrix(5, 6, -1.1);
    let par = a.try_mul(&b).unwrap();
    let ser = a.try_mul_serial(&b).unwrap();
    assert_eq!(par.dim(), (7, 6));
    assert_abs_diff_eq!(par, ser, epsilon = 1e-12);
}

#[test]
fn test_multiplication_is_associative() {
    let a = sample_matrix(3, 4, 0.1);
    let b = sample_matrix(4, 2, 0.7);
    let c = sample_matrix(2, 5, -0.4);
    let left = (&(&a * &b)) * &c;
    let right = &a * &(&b * &c);
    assert_abs_diff_eq!(left, right, epsilon = 1e-9);
}

#[test]
fn test_tensor_identity_identity() {
    let ii = I.tensor(&I);
    assert_eq!(ii, Matrix::identity(4));
}

#[test]
fn test_tensor_dimensions() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(4, 5);
    assert_eq!(a.tensor(&b).dim(), (8, 15));
}

#[test]
fn test_tensor_index_formula() {
    // X ⊗ I: the first factor owns the most significant index bit
    let xi = X.tensor(&I);
    assert_eq!(xi.get(0, 2), Complex::ONE);
    assert_eq!(xi.get(1, 3), Complex::ONE);
    assert_eq!(xi.get(2, 0), Complex::ONE);
    assert_eq!(xi.get(0, 1), Complex::ZERO);

    // I ⊗ X flips the least significant bit instead
    let ix = I.tensor(&X);
    assert_eq!(ix.get(0, 1), Complex::ONE);
    assert_eq!(ix.get(2, 3), Complex::ONE);
    assert_eq!(ix.get(0, 2), Complex::ZERO);
}

#[test]
fn test_tensor_all_folds_left_to_right() {
    let folded = Matrix::tensor_all([&*X, &*I, &*Z]).unwrap();
    let manual = X.tensor(&I).tensor(&Z);
    assert_eq!(folded, manual);
    assert_eq!(folded.dim(), (8, 8));
    assert!(matches!(
        Matrix::tensor_all(std::iter::empty()),
        Err(SimError::EmptyMatrix)
    ));
}

#[test]
fn test_hadamard_is_self_inverse() {
    let hh = &*H * &*H;
    assert_abs_diff_eq!(hh, Matrix::identity(2), epsilon = 1e-12);
}

#[test]
fn test_dagger() {
    let m = Matrix::from_rows(vec![
        vec![Complex::ONE, Complex::I],
        vec![Complex::ZERO, Complex::new(2.0, 0.25)],
    ])
    .unwrap();
    let d = m.dagger();
    assert_eq!(d.get(1, 0), Complex::NEG_I);
    assert_eq!(d.get(0, 1), Complex::ZERO);
    assert_eq!(d.get(1, 1), Complex::new(2.0, 1.75));
}

#[test]
fn test_constants_are_unitary() {
    for m in [&*I, &*H, &*X, &*Z, &*SWAP, &*CX] {
        assert!(m.is_unitary(1e-12));
    }
    assert!(!Matrix::from_rows(vec![vec![Complex::from_real(2.0)]])
        .unwrap()
        .is_unitary(1e-12));
}

#[test]
fn test_num_qubits() {
    assert_eq!(CX.num_qubits().unwrap(), 2);
    assert_eq!(Matrix::identity(8).num_qubits().unwrap(), 3);
    assert!(matches!(
        Matrix::identity(3).num_qubits(),
        Err(SimError::NotPowerOfTwo { dim: 3 })
    ));
    assert!(matches!(
        Matrix::zeros(2, 4).num_qubits(),
        Err(SimError::NonSquare { rows: 2, cols: 4 })
    ));
}

#[test]
fn test_exact_equality() {
    assert_eq!(I.tensor(&I), Matrix::identity(4));
    assert_ne!(*X, *Z);
    assert_ne!(Matrix::zeros(2, 2), Matrix::zeros(2, 1));
}

#[test]
fn test_display() {
    assert_eq!(X.to_string(), "[[ 0, 1 ]\n [ 1, 0 ]]");
    let v = Matrix::column_vector(&[Complex::I]).unwrap();
    assert_eq!(v.to_string(), "[[ 1i ]]");
}

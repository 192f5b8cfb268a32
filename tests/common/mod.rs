//! Shared test utilities for qirby integration tests.

#![allow(dead_code)]

use qirby::{Complex, Matrix, State};

pub const ATOL: f64 = 1e-10;

/// Install a fmt subscriber once; `RUST_LOG=qirby=debug` shows operator construction.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn c(re: f64, im: f64) -> Complex {
    Complex::from_rect(re, im)
}

/// Column vector with amplitude 1 at `index`.
pub fn basis_vector(dim: usize, index: usize) -> Matrix {
    let mut values = vec![Complex::ZERO; dim];
    values[index] = Complex::ONE;
    Matrix::column_vector(&values).unwrap()
}

pub fn assert_state_approx(state: &State, expected: &[Complex]) {
    let amplitudes = state.amplitudes();
    assert_eq!(amplitudes.len(), expected.len());
    for (i, (a, e)) in amplitudes.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a.re() - e.re()).abs() < ATOL && (a.im() - e.im()).abs() < ATOL,
            "State mismatch at index {}: got {}, expected {}",
            i,
            a,
            e
        );
    }
}

pub fn total_probability(state: &State) -> f64 {
    state.probabilities().iter().map(|(_, p)| p).sum()
}

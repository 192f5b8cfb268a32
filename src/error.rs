//! Error types for matrix algebra and register simulation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by the algebra engine and the register.
///
/// Every error is local to the operation that detected it; nothing in the
/// crate retries.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("{operation}: mismatched matrices {left:?} and {right:?} (rows, columns)")]
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("qubit {qubit} is out of range (num_qubits = {num_qubits})")]
    InvalidQubit { qubit: usize, num_qubits: usize },

    #[error("qubit {qubit} appears more than once in one gate application")]
    DuplicateQubit { qubit: usize },

    #[error("gate acts on {gate_qubits} qubit(s) but {targets} target(s) were given")]
    GateArity { gate_qubits: usize, targets: usize },

    #[error("operator dimension {dim} is not a power of two")]
    NotPowerOfTwo { dim: usize },

    #[error("operator must be square, got {rows}x{cols}")]
    NonSquare { rows: usize, cols: usize },

    #[error("register width {requested} is not in 1..={max}")]
    InvalidQubitCount { requested: usize, max: usize },

    #[error("matrix data cannot be empty")]
    EmptyMatrix,

    #[error("matrix row {row} has {actual} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("qubit {qubit} appears before any gate in the instruction stream")]
    OrphanQubit { qubit: usize },

    #[error("probability mass exhausted before the draw was covered (total = {total})")]
    ExhaustedProbability { total: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

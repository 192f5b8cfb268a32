use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::sync::LazyLock;

use crate::complex::Complex;
use crate::error::Result;
use crate::matrix::Matrix;

/// Single-qubit identity.
pub static I: LazyLock<Matrix> = LazyLock::new(|| Matrix::from_real(&[&[1.0, 0.0], &[0.0, 1.0]]));

/// Hadamard: 1/√2 on every entry, sign pattern `[[+, +], [+, -]]`.
pub static H: LazyLock<Matrix> = LazyLock::new(|| {
    let s = FRAC_1_SQRT_2;
    Matrix::from_real(&[&[s, s], &[s, -s]])
});

pub static X: LazyLock<Matrix> = LazyLock::new(|| Matrix::from_real(&[&[0.0, 1.0], &[1.0, 0.0]]));

/// `[[0, -i], [i, 0]]`
pub static Y: LazyLock<Matrix> = LazyLock::new(|| {
    let mut m = Matrix::zeros(2, 2);
    m.set(0, 1, Complex::NEG_I);
    m.set(1, 0, Complex::I);
    m
});

pub static Z: LazyLock<Matrix> = LazyLock::new(|| Matrix::from_real(&[&[1.0, 0.0], &[0.0, -1.0]]));

/// Exchanges the two qubits: |01> <-> |10>.
pub static SWAP: LazyLock<Matrix> = LazyLock::new(|| {
    Matrix::from_real(&[
        &[1.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 1.0, 0.0],
        &[0.0, 1.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 1.0],
    ])
});

/// Controlled-NOT; the first (most significant) qubit is the control.
pub static CX: LazyLock<Matrix> = LazyLock::new(|| permutation(4, &[(2, 3)]));

/// Toffoli; the first two qubits are controls.
pub static CCX: LazyLock<Matrix> = LazyLock::new(|| permutation(8, &[(6, 7)]));

/// Identity of size `dim` with the listed basis pairs exchanged.
fn permutation(dim: usize, swaps: &[(usize, usize)]) -> Matrix {
    let mut m = Matrix::identity(dim);
    for &(a, b) in swaps {
        m.set(a, a, Complex::ZERO);
        m.set(b, b, Complex::ZERO);
        m.set(a, b, Complex::ONE);
        m.set(b, a, Complex::ONE);
    }
    m
}

/// Named gates plus parameterised rotations and custom operators.
///
/// Every variant converts to a [`Matrix`]; the fixed variants clone the
/// shared constants above, which callers can never mutate in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    T,
    SWAP,
    CX,
    CCX,
    /// diag(1, e^(iθ))
    Phase(f64),
    Rx(f64),
    Ry(f64),
    Rz(f64),
    Custom { matrix: Matrix, label: String },
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::I => write!(f, "I"),
            Gate::X => write!(f, "X"),
            Gate::Y => write!(f, "Y"),
            Gate::Z => write!(f, "Z"),
            Gate::H => write!(f, "H"),
            Gate::S => write!(f, "S"),
            Gate::T => write!(f, "T"),
            Gate::SWAP => write!(f, "SWAP"),
            Gate::CX => write!(f, "CX"),
            Gate::CCX => write!(f, "CCX"),
            Gate::Phase(theta) => write!(f, "Phase({:.4})", theta),
            Gate::Rx(theta) => write!(f, "Rx({:.4})", theta),
            Gate::Ry(theta) => write!(f, "Ry({:.4})", theta),
            Gate::Rz(theta) => write!(f, "Rz({:.4})", theta),
            Gate::Custom { label, .. } => write!(f, "{}", label),
        }
    }
}

impl Gate {
    /// The unitary this gate represents.
    pub fn matrix(&self) -> Matrix {
        match self {
            Gate::I => I.clone(),
            Gate::X => X.clone(),
            Gate::Y => Y.clone(),
            Gate::Z => Z.clone(),
            Gate::H => H.clone(),
            Gate::S => diagonal(Complex::I),
            Gate::T => diagonal(Complex::new(1.0, 0.25)),
            Gate::SWAP => SWAP.clone(),
            Gate::CX => CX.clone(),
            Gate::CCX => CCX.clone(),
            Gate::Phase(theta) => diagonal(Complex::from_radians(1.0, *theta)),
            Gate::Rx(theta) => {
                let cos = Complex::from_real((theta / 2.0).cos());
                let neg_i_sin = Complex::from_rect(0.0, -(theta / 2.0).sin());
                rows2(cos, neg_i_sin, neg_i_sin, cos)
            }
            Gate::Ry(theta) => {
                let cos = Complex::from_real((theta / 2.0).cos());
                let sin = Complex::from_real((theta / 2.0).sin());
                rows2(cos, Complex::from_real(-(theta / 2.0).sin()), sin, cos)
            }
            Gate::Rz(theta) => rows2(
                Complex::from_radians(1.0, -theta / 2.0),
                Complex::ZERO,
                Complex::ZERO,
                Complex::from_radians(1.0, theta / 2.0),
            ),
            Gate::Custom { matrix, .. } => matrix.clone(),
        }
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> Result<usize> {
        match self {
            Gate::SWAP | Gate::CX => Ok(2),
            Gate::CCX => Ok(3),
            Gate::Custom { matrix, .. } => matrix.num_qubits(),
            _ => Ok(1),
        }
    }

    /// Adjoint gate; for a unitary this is the inverse.
    pub fn dagger(&self) -> Gate {
        match self {
            Gate::I | Gate::X | Gate::Y | Gate::Z | Gate::H | Gate::SWAP | Gate::CX | Gate::CCX => {
                self.clone()
            }
            Gate::S => Gate::Phase(-std::f64::consts::FRAC_PI_2),
            Gate::T => Gate::Phase(-std::f64::consts::FRAC_PI_4),
            Gate::Phase(theta) => Gate::Phase(-theta),
            Gate::Rx(theta) => Gate::Rx(-theta),
            Gate::Ry(theta) => Gate::Ry(-theta),
            Gate::Rz(theta) => Gate::Rz(-theta),
            Gate::Custom { matrix, label } => Gate::Custom {
                matrix: matrix.dagger(),
                label: format!("{}†", label),
            },
        }
    }
}

impl From<Gate> for Matrix {
    fn from(gate: Gate) -> Self {
        gate.matrix()
    }
}

impl From<&Gate> for Matrix {
    fn from(gate: &Gate) -> Self {
        gate.matrix()
    }
}

fn diagonal(lower: Complex) -> Matrix {
    rows2(Complex::ONE, Complex::ZERO, Complex::ZERO, lower)
}

fn rows2(a: Complex, b: Complex, c: Complex, d: Complex) -> Matrix {
    let mut m = Matrix::zeros(2, 2);
    m.set(0, 0, a);
    m.set(0, 1, b);
    m.set(1, 0, c);
    m.set(1, 1, d);
    m
}

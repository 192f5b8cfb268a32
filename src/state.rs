//! The simulated register.
//!
//! A [`State`] owns a `2^N x 1` state vector and builds full-register
//! operators for gates addressed to arbitrary, possibly unordered and
//! non-adjacent, qubit slots. Targets are first permuted into the leading
//! slots with shift operators, the gate is padded with identities, and the
//! permutation is undone:
//!
//! ```text
//! operation = unshift * (gate ⊗ I ⊗ ... ⊗ I) * shift
//! ```

use std::collections::{BTreeMap, HashSet};
use std::iter;
use std::sync::OnceLock;

use rand::Rng;
use tracing::debug;

use crate::complex::Complex;
use crate::config::SimulatorConfig;
use crate::error::{Result, SimError};
use crate::gate;
use crate::index::{iter_basis, BasisState};
use crate::instruct::{Instruction, Token};
use crate::matrix::Matrix;
use crate::measure;

#[derive(Debug, Clone)]
pub struct State {
    num_qubits: usize,
    state_vector: Matrix,
    config: SimulatorConfig,
    identity: OnceLock<Matrix>,
}

impl State {
    /// Creates an `num_qubits` register in |0...0> with the default config.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_config(num_qubits, SimulatorConfig::default())
    }

    /// Creates an `num_qubits` register in |0...0>.
    ///
    /// # Errors
    /// [`SimError::InvalidQubitCount`] if `num_qubits` is zero or exceeds
    /// `config.max_qubits`.
    pub fn with_config(num_qubits: usize, config: SimulatorConfig) -> Result<Self> {
        if num_qubits == 0 || num_qubits > config.max_qubits {
            return Err(SimError::InvalidQubitCount {
                requested: num_qubits,
                max: config.max_qubits,
            });
        }
        let mut state_vector = Matrix::zeros(1 << num_qubits, 1);
        state_vector.set(0, 0, Complex::ONE);
        Ok(State {
            num_qubits,
            state_vector,
            config,
            identity: OnceLock::new(),
        })
    }

    /// Creates a register holding explicit amplitudes. The length must be a
    /// power of two of at least 2. Normalisation is not checked.
    pub fn from_vector(amplitudes: &[Complex]) -> Result<Self> {
        let dim = amplitudes.len();
        if dim < 2 || !dim.is_power_of_two() {
            return Err(SimError::NotPowerOfTwo { dim });
        }
        let mut state = Self::new(dim.trailing_zeros() as usize)?;
        state.state_vector = Matrix::column_vector(amplitudes)?;
        Ok(state)
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Length of the state vector, `2^N`.
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The raw `2^N x 1` state vector.
    pub fn state_vector(&self) -> &Matrix {
        &self.state_vector
    }

    pub fn amplitudes(&self) -> Vec<Complex> {
        self.state_vector.column(0)
    }

    /// L2 norm of the state vector.
    pub fn norm(&self) -> f64 {
        self.state_vector
            .as_array()
            .iter()
            .map(|c| c.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Full-register identity, built on first use and cached.
    pub fn identity(&self) -> &Matrix {
        self.identity.get_or_init(|| Matrix::identity(self.dim()))
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if self.config.parallel {
            a.try_mul(b)
        } else {
            a.try_mul_serial(b)
        }
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(SimError::InvalidQubit {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn check_targets(&self, qubits: &[usize]) -> Result<()> {
        let mut seen = HashSet::with_capacity(qubits.len());
        for &q in qubits {
            self.check_qubit(q)?;
            if !seen.insert(q) {
                return Err(SimError::DuplicateQubit { qubit: q });
            }
        }
        Ok(())
    }

    /// Permutation operator moving the qubit in slot `current` to slot
    /// `target`. The qubits in between each move one slot toward `current`.
    pub fn make_shift_operator(&self, current: usize, target: usize) -> Result<Matrix> {
        self.check_qubit(current)?;
        self.check_qubit(target)?;
        if current == target {
            return Ok(self.identity().clone());
        }

        let dist = current.abs_diff(target);
        let lowest = current.min(target);
        let block = block_shift(dist, target > current)?;
        let trailing = self.num_qubits - lowest - dist - 1;
        debug!(current, target, "building shift operator");

        Ok(Matrix::identity(1 << lowest)
            .tensor(&block)
            .tensor(&Matrix::identity(1 << trailing)))
    }

    /// Full-register operator applying `op` to `qubits`.
    ///
    /// `qubits[i]` is the register slot that plays the role of the operator's
    /// slot `i`. An empty target list means `op` already spans the register.
    ///
    /// # Errors
    /// Fails on out-of-range or duplicate qubits, on an operator whose size
    /// does not match the number of targets, and on dimension mismatches.
    pub fn make_operation(&self, op: &Matrix, qubits: &[usize]) -> Result<Matrix> {
        if qubits.is_empty() {
            let dim = self.dim();
            if op.dim() != (dim, dim) {
                return Err(SimError::DimensionMismatch {
                    operation: "full-register operator",
                    left: op.dim(),
                    right: (dim, dim),
                });
            }
            return Ok(op.clone());
        }

        self.check_targets(qubits)?;
        let gate_qubits = op.num_qubits()?;
        if gate_qubits != qubits.len() {
            return Err(SimError::GateArity {
                gate_qubits,
                targets: qubits.len(),
            });
        }
        debug!(?qubits, gate_qubits, "building operation");

        // Bring each target into slot i. Earlier targets already fill slots
        // 0..i, so the qubit moves left and the slots it passes move right.
        let mut positions = qubits.to_vec();
        let mut moves = Vec::with_capacity(positions.len());
        let mut shift: Option<Matrix> = None;
        for i in 0..positions.len() {
            let from = positions[i];
            for p in positions[i + 1..].iter_mut() {
                if *p < from {
                    *p += 1;
                }
            }
            if from == i {
                continue;
            }
            let step = self.make_shift_operator(from, i)?;
            shift = Some(match shift {
                Some(s) => self.multiply(&step, &s)?,
                None => step,
            });
            moves.push((from, i));
        }

        let extended = Matrix::tensor_all(
            iter::once(op).chain(iter::repeat(&*gate::I).take(self.num_qubits - gate_qubits)),
        )?;

        let mut operation = match shift {
            Some(s) => self.multiply(&extended, &s)?,
            None => extended,
        };
        for &(from, to) in moves.iter().rev() {
            let step = self.make_shift_operator(to, from)?;
            operation = self.multiply(&step, &operation)?;
        }
        Ok(operation)
    }

    /// Folds instructions into one operator. The first instruction is the
    /// rightmost factor, so it acts on the state first.
    pub fn compile(&self, instructions: &[Instruction]) -> Result<Matrix> {
        debug!(steps = instructions.len(), "compiling instruction set");
        let mut compiled: Option<Matrix> = None;
        for instruction in instructions {
            let step = self.make_operation(&instruction.operator, &instruction.targets)?;
            compiled = Some(match compiled {
                Some(acc) => self.multiply(&step, &acc)?,
                None => step,
            });
        }
        Ok(compiled.unwrap_or_else(|| self.identity().clone()))
    }

    /// Compiles a flat gate/qubit token stream.
    pub fn compile_stream<It>(&self, tokens: It) -> Result<Matrix>
    where
        It: IntoIterator<Item = Token>,
    {
        let instructions = Instruction::parse_stream(tokens)?;
        self.compile(&instructions)
    }

    /// Replaces the state vector with `operator * state_vector`.
    pub fn apply_operator(&mut self, operator: &Matrix) -> Result<()> {
        self.state_vector = self.multiply(operator, &self.state_vector)?;
        Ok(())
    }

    /// Applies `op` to `qubits`.
    pub fn apply_gate(&mut self, op: &Matrix, qubits: &[usize]) -> Result<()> {
        let operation = self.make_operation(op, qubits)?;
        self.apply_operator(&operation)
    }

    pub fn apply_instruction(&mut self, instruction: &Instruction) -> Result<()> {
        self.apply_gate(&instruction.operator, &instruction.targets)
    }

    /// Measurement probability of every basis state, in index order.
    pub fn probabilities(&self) -> Vec<(BasisState, f64)> {
        let amplitudes = self.state_vector.as_array();
        iter_basis(self.num_qubits)
            .map(|(i, basis)| (basis, amplitudes[[i, 0]].norm_sqr()))
            .collect()
    }

    /// Probabilities keyed by bit string, e.g. `"01"`.
    pub fn probability_map(&self) -> BTreeMap<String, f64> {
        self.probabilities()
            .into_iter()
            .map(|(basis, p)| (basis.to_string(), p))
            .collect()
    }

    /// Draws one basis outcome without collapsing the register.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<BasisState> {
        measure::sample(self, rng)
    }

    pub fn measure(&self, nshots: usize, rng: &mut impl Rng) -> Result<Vec<BasisState>> {
        measure::measure(self, nshots, rng)
    }
}

/// Permutation of a `dist + 1` qubit block moving its first slot to its
/// last (`rightward`) or its last slot to its first.
///
/// Built from adjacent swaps: the qubit is carried `dist - 1` slots by the
/// smaller block, then one `SWAP` on the final pair finishes the move.
fn block_shift(dist: usize, rightward: bool) -> Result<Matrix> {
    if dist == 1 {
        return Ok(gate::SWAP.clone());
    }
    let inner = block_shift(dist - 1, rightward)?;
    let pad = Matrix::identity(1 << (dist - 1));
    let (step, carried) = if rightward {
        (pad.tensor(&gate::SWAP), inner.tensor(&gate::I))
    } else {
        (gate::SWAP.tensor(&pad), gate::I.tensor(&inner))
    };
    step.try_mul_serial(&carried)
}

//! Gate-application instructions.
//!
//! A circuit is an ordered list of [`Instruction`]s, first instruction
//! acting first on the state. A flat stream of [`Token`]s, where each gate
//! token opens a new instruction and the following qubit tokens are its
//! targets, parses into the same list.

use crate::error::{Result, SimError};
use crate::gate::Gate;
use crate::matrix::Matrix;

/// An operator together with the qubits it acts on, in operator slot order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub operator: Matrix,
    pub targets: Vec<usize>,
}

impl Instruction {
    pub fn new(operator: impl Into<Matrix>, targets: Vec<usize>) -> Self {
        Instruction {
            operator: operator.into(),
            targets,
        }
    }

    /// Groups a flat token stream into instructions.
    ///
    /// # Errors
    /// Returns [`SimError::OrphanQubit`] if a qubit token precedes every gate.
    ///
    /// # Example
    /// ```
    /// use qirby::gate::Gate;
    /// use qirby::instruct::{Instruction, Token};
    ///
    /// let tokens = vec![
    ///     Token::from(Gate::H), Token::Qubit(0),
    ///     Token::from(Gate::CX), Token::Qubit(0), Token::Qubit(1),
    /// ];
    /// let instructions = Instruction::parse_stream(tokens).unwrap();
    /// assert_eq!(instructions.len(), 2);
    /// assert_eq!(instructions[1].targets, vec![0, 1]);
    /// ```
    pub fn parse_stream<It>(tokens: It) -> Result<Vec<Instruction>>
    where
        It: IntoIterator<Item = Token>,
    {
        let mut instructions: Vec<Instruction> = Vec::new();
        for token in tokens {
            match token {
                Token::Gate(operator) => instructions.push(Instruction {
                    operator,
                    targets: Vec::new(),
                }),
                Token::Qubit(qubit) => match instructions.last_mut() {
                    Some(current) => current.targets.push(qubit),
                    None => return Err(SimError::OrphanQubit { qubit }),
                },
            }
        }
        Ok(instructions)
    }
}

/// Place `gate` on `targets`.
pub fn put(targets: Vec<usize>, gate: impl Into<Matrix>) -> Instruction {
    Instruction::new(gate, targets)
}

/// One element of a flat instruction stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Gate(Matrix),
    Qubit(usize),
}

impl From<Matrix> for Token {
    fn from(m: Matrix) -> Self {
        Token::Gate(m)
    }
}

impl From<&Matrix> for Token {
    fn from(m: &Matrix) -> Self {
        Token::Gate(m.clone())
    }
}

impl From<Gate> for Token {
    fn from(g: Gate) -> Self {
        Token::Gate(g.matrix())
    }
}

impl From<usize> for Token {
    fn from(q: usize) -> Self {
        Token::Qubit(q)
    }
}

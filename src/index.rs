//! Basis-state indexing.
//!
//! Slot 0 is the leftmost factor of the tensor product that built the
//! register, so it is the most significant bit of a basis index.

use std::fmt;

/// One computational basis state as a bit per qubit slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasisState {
    bits: Vec<bool>,
}

impl BasisState {
    pub fn new(bits: Vec<bool>) -> Self {
        BasisState { bits }
    }

    /// Decodes `index` for a register of `num_qubits` qubits.
    ///
    /// # Example
    /// ```
    /// use qirby::index::BasisState;
    /// // 0b110 on 3 qubits: slots 0 and 1 set
    /// assert_eq!(BasisState::from_index(6, 3).bits(), &[true, true, false]);
    /// ```
    pub fn from_index(index: usize, num_qubits: usize) -> Self {
        let bits = (0..num_qubits)
            .map(|slot| (index >> (num_qubits - 1 - slot)) & 1 == 1)
            .collect();
        BasisState { bits }
    }

    /// Encodes back to a basis index.
    pub fn index(&self) -> usize {
        self.bits
            .iter()
            .fold(0usize, |acc, &bit| (acc << 1) | usize::from(bit))
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Value of qubit `slot`.
    pub fn bit(&self, slot: usize) -> bool {
        self.bits[slot]
    }

    pub fn num_qubits(&self) -> usize {
        self.bits.len()
    }
}

impl fmt::Display for BasisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Iterate over all basis states of a register, in index order.
pub fn iter_basis(num_qubits: usize) -> impl Iterator<Item = (usize, BasisState)> {
    (0..1usize << num_qubits).map(move |i| (i, BasisState::from_index(i, num_qubits)))
}

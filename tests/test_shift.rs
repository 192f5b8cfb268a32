mod common;

use approx::assert_abs_diff_eq;

use qirby::gate::X;
use qirby::{Complex, Matrix, SimError, State};

use common::basis_vector;

/// Index of the single non-zero amplitude of a basis vector.
fn excited_index(v: &Matrix) -> usize {
    let hits: Vec<usize> = (0..v.rows())
        .filter(|&i| v.get(i, 0).magnitude() > 0.5)
        .collect();
    assert_eq!(hits.len(), 1, "not a basis vector: {}", v);
    hits[0]
}

#[test]
fn test_same_slot_is_identity() {
    let state = State::new(3).unwrap();
    for q in 0..3 {
        assert_eq!(state.make_shift_operator(q, q).unwrap(), Matrix::identity(8));
    }
}

#[test]
fn test_adjacent_shift_is_embedded_swap() {
    let state = State::new(3).unwrap();
    let shift = state.make_shift_operator(1, 2).unwrap();
    // |010> -> |001>
    assert_eq!(excited_index(&(&shift * &basis_vector(8, 0b010))), 0b001);
    // |100> untouched
    assert_eq!(excited_index(&(&shift * &basis_vector(8, 0b100))), 0b100);
}

#[test]
fn test_shift_moves_qubit_right() {
    let state = State::new(4).unwrap();
    let shift = state.make_shift_operator(0, 3).unwrap();
    // slot 0 -> slot 3, slots 1..3 move left: |q0 q1 q2 q3> -> |q1 q2 q3 q0>
    assert_eq!(excited_index(&(&shift * &basis_vector(16, 0b1000))), 0b0001);
    assert_eq!(excited_index(&(&shift * &basis_vector(16, 0b0100))), 0b1000);
    assert_eq!(excited_index(&(&shift * &basis_vector(16, 0b1011))), 0b0111);
}

#[test]
fn test_shift_moves_qubit_left() {
    let state = State::new(4).unwrap();
    let shift = state.make_shift_operator(3, 1).unwrap();
    // |q0 q1 q2 q3> -> |q0 q3 q1 q2>
    assert_eq!(excited_index(&(&shift * &basis_vector(16, 0b0001))), 0b0100);
    assert_eq!(excited_index(&(&shift * &basis_vector(16, 0b0100))), 0b0010);
    assert_eq!(excited_index(&(&shift * &basis_vector(16, 0b1000))), 0b1000);
}

#[test]
fn test_shift_pairs_compose_to_identity() {
    let state = State::new(4).unwrap();
    for a in 0..4 {
        for b in 0..4 {
            let forward = state.make_shift_operator(a, b).unwrap();
            let back = state.make_shift_operator(b, a).unwrap();
            assert_abs_diff_eq!(&back * &forward, Matrix::identity(16), epsilon = 1e-12);
        }
    }
}

#[test]
fn test_shift_is_permutation() {
    let state = State::new(3).unwrap();
    let shift = state.make_shift_operator(2, 0).unwrap();
    for r in 0..8 {
        let ones = shift.row(r).iter().filter(|&&v| v == Complex::ONE).count();
        let zeros = shift.row(r).iter().filter(|&&v| v == Complex::ZERO).count();
        assert_eq!((ones, zeros), (1, 7));
    }
}

#[test]
fn test_shift_applied_to_register() {
    // X on qubit 0 excites index 0b100; moving slot 0 to slot 2 excites 0b001
    let mut state = State::new(3).unwrap();
    state.apply_gate(&X, &[0]).unwrap();
    let shift = state.make_shift_operator(0, 2).unwrap();
    state.apply_operator(&shift).unwrap();
    assert_eq!(excited_index(state.state_vector()), 0b001);
    assert_eq!(state.probabilities()[1].0.to_string(), "001");
}

#[test]
fn test_shift_rejects_out_of_range() {
    let state = State::new(2).unwrap();
    assert!(matches!(
        state.make_shift_operator(0, 2),
        Err(SimError::InvalidQubit { qubit: 2, num_qubits: 2 })
    ));
    assert!(state.make_shift_operator(5, 0).is_err());
}

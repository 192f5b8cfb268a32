//! Computational-basis sampling.
//!
//! - [`probs`] - probability of every basis index
//! - [`sample`] - draw one outcome without collapsing the state
//! - [`measure`] - draw several outcomes

use rand::Rng;
use tracing::warn;

use crate::error::{Result, SimError};
use crate::index::BasisState;
use crate::state::State;

/// Probability of each basis index, `|amplitude|^2`.
pub fn probs(state: &State) -> Vec<f64> {
    state
        .state_vector()
        .as_array()
        .iter()
        .map(|c| c.norm_sqr())
        .collect()
}

/// Walk the distribution until the uniform draw is covered.
///
/// Floating drift can leave the total mass just under 1, so a draw past the
/// end falls back to the last non-zero outcome when the shortfall is within
/// `tolerance`.
fn sample_from_probs(probs: &[f64], tolerance: f64, rng: &mut impl Rng) -> Result<usize> {
    let r: f64 = rng.r#gen();
    let mut cumsum = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        cumsum += p;
        if r < cumsum {
            return Ok(i);
        }
    }
    if cumsum >= 1.0 - tolerance {
        if let Some(last) = probs.iter().rposition(|&p| p > 0.0) {
            warn!(draw = r, total = cumsum, "probability mass short of draw, using last outcome");
            return Ok(last);
        }
    }
    Err(SimError::ExhaustedProbability { total: cumsum })
}

/// Sample one measurement outcome.
///
/// # Errors
/// [`SimError::ExhaustedProbability`] when the amplitudes do not carry
/// enough probability mass to cover the draw.
///
/// # Example
/// ```
/// use qirby::{State, measure::sample};
/// use rand::SeedableRng;
///
/// let state = State::new(2).unwrap(); // |00⟩
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// assert_eq!(sample(&state, &mut rng).unwrap().to_string(), "00");
/// ```
pub fn sample(state: &State, rng: &mut impl Rng) -> Result<BasisState> {
    let p = probs(state);
    let index = sample_from_probs(&p, state.config().probability_tolerance, rng)?;
    Ok(BasisState::from_index(index, state.num_qubits()))
}

/// Sample `nshots` outcomes.
pub fn measure(state: &State, nshots: usize, rng: &mut impl Rng) -> Result<Vec<BasisState>> {
    let p = probs(state);
    let tolerance = state.config().probability_tolerance;
    (0..nshots)
        .map(|_| {
            let index = sample_from_probs(&p, tolerance, &mut *rng)?;
            Ok(BasisState::from_index(index, state.num_qubits()))
        })
        .collect()
}

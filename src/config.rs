use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register width accepted. Full-register operators are dense
    /// `2^N x 2^N` matrices, so memory grows as `4^N`.
    pub max_qubits: usize,
    /// Compute matrix-product rows on the rayon pool.
    pub parallel: bool,
    /// Allowed shortfall of total probability mass before sampling fails
    /// instead of falling back to the last non-zero outcome.
    pub probability_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: 12,
            parallel: true,
            probability_tolerance: 1e-9,
        }
    }
}

impl SimulatorConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

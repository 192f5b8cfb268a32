pub mod complex;
pub mod config;
pub mod error;
pub mod gate;
pub mod index;
pub mod instruct;
pub mod json;
pub mod matrix;
pub mod measure;
pub mod state;

pub use complex::Complex;
pub use config::SimulatorConfig;
pub use error::{Result, SimError};
pub use gate::Gate;
pub use index::BasisState;
pub use instruct::{put, Instruction, Token};
pub use json::{matrix_from_json, matrix_to_json, ComplexData, MatrixData};
pub use matrix::Matrix;
pub use state::State;

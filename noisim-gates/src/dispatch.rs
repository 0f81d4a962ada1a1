//! Resolution from a gate kind plus parameters to a concrete matrix
//!
//! The executor calls these when walking a recorded program. Parameter
//! counts are validated here so a malformed opcode fails before touching
//! the state.

use crate::matrices;
use noisim_core::{GateKind, Result, SimError};
use num_complex::Complex64;

fn check_params(kind: GateKind, params: &[f64]) -> Result<()> {
    if params.len() != kind.num_params() {
        return Err(SimError::invalid_argument(format!(
            "{} expects {} parameters, got {}",
            kind,
            kind.num_params(),
            params.len()
        )));
    }
    Ok(())
}

/// Build the 2×2 matrix for a single-qubit gate kind
///
/// Toffoli and CSWAP are not resolved here: the executor lowers them to X
/// and SWAP with extended controller lists.
pub fn single_qubit_matrix(kind: GateKind, params: &[f64]) -> Result<[[Complex64; 2]; 2]> {
    check_params(kind, params)?;
    match kind {
        GateKind::Identity => Ok(matrices::IDENTITY),
        GateKind::Hadamard => Ok(matrices::HADAMARD),
        GateKind::U22 => Ok(matrices::u22(params)),
        GateKind::X => Ok(matrices::PAULI_X),
        GateKind::Y => Ok(matrices::PAULI_Y),
        GateKind::Z => Ok(matrices::PAULI_Z),
        GateKind::Sx => Ok(matrices::SQRT_X),
        GateKind::Rx => Ok(matrices::rotation_x(params[0])),
        GateKind::Ry => Ok(matrices::rotation_y(params[0])),
        GateKind::Rz => Ok(matrices::rotation_z(params[0])),
        GateKind::Rphi90 => Ok(matrices::rphi90(params[0])),
        GateKind::Rphi180 => Ok(matrices::rphi180(params[0])),
        GateKind::Rphi => Ok(matrices::rphi(params[0], params[1])),
        _ => Err(SimError::invalid_argument(format!(
            "{} has no 2x2 matrix",
            kind
        ))),
    }
}

/// Build the 4×4 matrix for a two-qubit gate kind
pub fn two_qubit_matrix(kind: GateKind, params: &[f64]) -> Result<[[Complex64; 4]; 4]> {
    check_params(kind, params)?;
    match kind {
        GateKind::Cz => Ok(matrices::CZ),
        GateKind::Cnot => Ok(matrices::CNOT),
        GateKind::Swap => Ok(matrices::SWAP),
        GateKind::Iswap => Ok(matrices::ISWAP),
        GateKind::Xy => Ok(matrices::xy(params[0])),
        _ => Err(SimError::invalid_argument(format!(
            "{} has no 4x4 matrix",
            kind
        ))),
    }
}

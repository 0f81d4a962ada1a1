//! Computational-basis sampling and measured-bit projection

use crate::state_vector::QubitState;
use noisim_core::{Result, SimError};

/// Draw a basis index from |ψ|² by inverse-CDF walk
///
/// Walks indices in order, subtracting each probability from the draw; the
/// first index that exhausts it is returned. A walk that runs past the last
/// amplitude means the state lost normalization and fails with
/// `InternalInconsistency`.
pub fn sample_basis_index(state: &QubitState, r: f64) -> Result<usize> {
    let mut r = r;
    for (i, a) in state.amplitudes().iter().enumerate() {
        let p = a.norm_sqr();
        if r < p {
            return Ok(i);
        }
        r -= p;
    }
    Err(SimError::InternalInconsistency(
        "basis sampling walked past the last amplitude; state is not normalized".to_string(),
    ))
}

/// Project a full outcome onto the measured qubits
///
/// Bit k of the result is bit `measure_qubits[k]` of `outcome`; selection
/// order defines the compacted bit order.
pub fn compact_outcome(outcome: usize, measure_qubits: &[usize]) -> usize {
    let mut compact = 0usize;
    for (k, &q) in measure_qubits.iter().enumerate() {
        if outcome & (1 << q) != 0 {
            compact |= 1 << k;
        }
    }
    compact
}

//! Dense complex state vector over n qubits

use crate::kernels;
use noisim_core::{Result, SimError};
use num_complex::Complex64;

/// Largest register the dense representation accepts (2^30 amplitudes)
pub const MAX_QUBITS: usize = 30;

/// A dense quantum register of 2^n complex amplitudes
///
/// Bit k of a basis index is the computational state of qubit k. The
/// register starts in |0…0⟩ and is reset to it at the beginning of every
/// shot.
///
/// # Example
///
/// ```
/// use noisim_state::QubitState;
/// use noisim_gates::matrices::HADAMARD;
///
/// let mut state = QubitState::new(2)?;
/// state.apply_unitary_1q(0, &HADAMARD, &[], false)?;
/// assert!(state.is_normalized(1e-10));
/// # Ok::<(), noisim_core::SimError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QubitState {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl QubitState {
    /// Allocate a register of `num_qubits` qubits in |0…0⟩
    ///
    /// # Errors
    /// `InvalidArgument` if `num_qubits` is zero or above [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(SimError::invalid_argument(format!(
                "qubit count must be in 1..={}, got {}",
                MAX_QUBITS, num_qubits
            )));
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes, indexed by basis label
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable access to the amplitudes
    #[inline]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// |a_i|² for one basis index
    #[inline]
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sqr()
    }

    /// Reset to |0…0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    /// L2 norm of the state
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Divide every amplitude by the norm
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            let inv = 1.0 / norm;
            for a in &mut self.amplitudes {
                *a *= inv;
            }
        }
    }

    /// True if |norm − 1| < epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    pub(crate) fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(SimError::out_of_range(qubit, self.num_qubits));
        }
        Ok(())
    }

    /// Build the controller bit mask, validating each index
    ///
    /// Controllers must lie inside the register and must not overlap the
    /// gate's target qubits. Ordering and duplicates within the controller
    /// list are irrelevant once folded into a mask.
    fn controller_mask(&self, controllers: &[usize], targets: &[usize]) -> Result<usize> {
        let mut mask = 0usize;
        for &c in controllers {
            self.check_qubit(c)?;
            if targets.contains(&c) {
                return Err(SimError::invalid_argument(format!(
                    "controller qubit {} overlaps a target qubit",
                    c
                )));
            }
            mask |= 1 << c;
        }
        Ok(mask)
    }

    /// Apply a 2×2 unitary to one qubit
    ///
    /// Only basis states whose controller bits are all 1 are touched. With
    /// `dagger` the conjugate transpose is applied.
    pub fn apply_unitary_1q(
        &mut self,
        qubit: usize,
        matrix: &[[Complex64; 2]; 2],
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.check_qubit(qubit)?;
        let cmask = self.controller_mask(controllers, &[qubit])?;
        kernels::apply_single_qubit(&mut self.amplitudes, matrix, qubit, cmask, dagger);
        Ok(())
    }

    /// Apply a 4×4 unitary to an ordered qubit pair
    ///
    /// The matrix is indexed in the block order (q1=0,q2=0), (q1=0,q2=1),
    /// (q1=1,q2=0), (q1=1,q2=1): the first qubit is the high bit.
    pub fn apply_unitary_2q(
        &mut self,
        qubit1: usize,
        qubit2: usize,
        matrix: &[[Complex64; 4]; 4],
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.check_qubit(qubit1)?;
        self.check_qubit(qubit2)?;
        if qubit1 == qubit2 {
            return Err(SimError::invalid_argument(format!(
                "two-qubit gate targets must differ, got qubit {} twice",
                qubit1
            )));
        }
        let cmask = self.controller_mask(controllers, &[qubit1, qubit2])?;
        kernels::apply_two_qubit(&mut self.amplitudes, matrix, qubit1, qubit2, cmask, dagger);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let state = QubitState::new(3).unwrap();
        assert_eq!(state.num_qubits(), 3);
        assert_eq!(state.dimension(), 8);
        assert_eq!(state.amplitudes()[0], Complex64::new(1.0, 0.0));
        for i in 1..8 {
            assert_eq!(state.amplitudes()[i], Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_qubit_count_bounds() {
        assert!(QubitState::new(0).is_err());
        assert!(QubitState::new(MAX_QUBITS + 1).is_err());
        assert!(QubitState::new(1).is_ok());
    }

    #[test]
    fn test_reset() {
        let mut state = QubitState::new(2).unwrap();
        state.amplitudes_mut()[0] = Complex64::new(0.0, 0.0);
        state.amplitudes_mut()[3] = Complex64::new(1.0, 0.0);
        state.reset();
        assert_eq!(state.amplitudes()[0], Complex64::new(1.0, 0.0));
        assert_eq!(state.amplitudes()[3], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_normalize() {
        let mut state = QubitState::new(1).unwrap();
        state.amplitudes_mut()[0] = Complex64::new(3.0, 0.0);
        state.amplitudes_mut()[1] = Complex64::new(4.0, 0.0);
        state.normalize();
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(state.probability(0), 0.36, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut state = QubitState::new(2).unwrap();
        let m = [[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]; 2];
        assert!(matches!(
            state.apply_unitary_1q(2, &m, &[], false),
            Err(SimError::OutOfRange { qubit: 2, .. })
        ));
    }

    #[test]
    fn test_controller_overlapping_target_rejected() {
        let mut state = QubitState::new(2).unwrap();
        let m = [
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ];
        assert!(state.apply_unitary_1q(0, &m, &[0], false).is_err());
    }

    #[test]
    fn test_equal_2q_targets_rejected() {
        let mut state = QubitState::new(2).unwrap();
        let m = [[Complex64::new(0.0, 0.0); 4]; 4];
        assert!(state.apply_unitary_2q(1, 1, &m, &[], false).is_err());
    }
}

//! Stochastic unravellings of the supported Kraus channels
//!
//! Each channel consumes exactly one random draw r ∈ [0,1), passed in by
//! the caller. Keeping the draw outside the channel makes the draw order an
//! explicit part of the executor's contract and lets tests drive every
//! branch deterministically.

use crate::state_vector::QubitState;
use noisim_core::noise::check_probability;
use noisim_core::{NoiseKind, Result, SimError};
use num_complex::Complex64;

/// Tolerance for the damping branch masses summing to 1
const KRAUS_SUM_TOLERANCE: f64 = 1e-10;

/// Pauli X on one qubit: swap each |0⟩/|1⟩ amplitude pair
fn pauli_x(state: &mut QubitState, qubit: usize) {
    let qmask = 1usize << qubit;
    let amps = state.amplitudes_mut();
    for i in 0..amps.len() {
        if i & qmask == 0 {
            amps.swap(i, i | qmask);
        }
    }
}

/// Pauli Y on one qubit: swap with ±i phases
fn pauli_y(state: &mut QubitState, qubit: usize) {
    let qmask = 1usize << qubit;
    let amps = state.amplitudes_mut();
    for i in 0..amps.len() {
        if i & qmask == 0 {
            let j = i | qmask;
            let a0 = amps[i];
            let a1 = amps[j];
            amps[i] = Complex64::new(a1.im, -a1.re); // -i · a1
            amps[j] = Complex64::new(-a0.im, a0.re); // i · a0
        }
    }
}

/// Pauli Z on one qubit: negate the |1⟩ amplitudes
fn pauli_z(state: &mut QubitState, qubit: usize) {
    let qmask = 1usize << qubit;
    for (i, a) in state.amplitudes_mut().iter_mut().enumerate() {
        if i & qmask != 0 {
            *a = -*a;
        }
    }
}

fn apply_pauli(state: &mut QubitState, which: usize, qubit: usize) {
    match which {
        0 => {}
        1 => pauli_x(state, qubit),
        2 => pauli_y(state, qubit),
        _ => pauli_z(state, qubit),
    }
}

/// Single-qubit depolarizing: with probability p apply X, Y or Z uniformly
///
/// The branch split follows the draw directly: r < p/3 → X, r < 2p/3 → Y,
/// r < p → Z, else identity. Matches the ensemble channel only in
/// expectation over shots.
pub fn depolarizing(state: &mut QubitState, qubit: usize, p: f64, r: f64) -> Result<()> {
    state.check_qubit(qubit)?;
    check_probability(NoiseKind::Depolarizing, p)?;
    if r >= p {
        return Ok(());
    }
    if r < p / 3.0 {
        pauli_x(state, qubit);
    } else if r < 2.0 * p / 3.0 {
        pauli_y(state, qubit);
    } else {
        pauli_z(state, qubit);
    }
    Ok(())
}

/// Bit flip: with probability p apply X
pub fn bit_flip(state: &mut QubitState, qubit: usize, p: f64, r: f64) -> Result<()> {
    state.check_qubit(qubit)?;
    check_probability(NoiseKind::BitFlip, p)?;
    if r < p {
        pauli_x(state, qubit);
    }
    Ok(())
}

/// Phase flip: with probability p apply Z
pub fn phase_flip(state: &mut QubitState, qubit: usize, p: f64, r: f64) -> Result<()> {
    state.check_qubit(qubit)?;
    check_probability(NoiseKind::PhaseFlip, p)?;
    if r < p {
        pauli_z(state, qubit);
    }
    Ok(())
}

/// Amplitude damping with decay probability gamma
///
/// The branch masses are computed from the current state: p1 collects
/// |a_i·√γ|² over indices with the qubit set, p0 the no-decay remainder
/// plus the already-grounded population. Their sum must be 1 within
/// 1e-10, or the state was corrupted and `InvalidNoise` is returned.
///
/// The decay branch moves each |1⟩ amplitude onto its |0⟩ sibling by
/// overwriting the sibling, not adding to it. A faithful Kraus E1 would
/// accumulate; this kernel keeps the overwrite followed by renormalization,
/// and the divergence is pinned by
/// `tests::test_decay_branch_overwrites_zero_sibling`.
pub fn amplitude_damping(state: &mut QubitState, qubit: usize, gamma: f64, r: f64) -> Result<()> {
    state.check_qubit(qubit)?;
    check_probability(NoiseKind::Damping, gamma)?;

    let qmask = 1usize << qubit;
    let e0 = (1.0 - gamma).sqrt();
    let e1 = gamma.sqrt();

    let mut p0 = 0.0;
    let mut p1 = 0.0;
    {
        let amps = state.amplitudes();
        for i in 0..amps.len() {
            if i & qmask != 0 {
                p1 += (amps[i] * e1).norm_sqr();
                p0 += (amps[i] * e0).norm_sqr() + amps[i & !qmask].norm_sqr();
            }
        }
    }

    if (p0 + p1 - 1.0).abs() > KRAUS_SUM_TOLERANCE {
        return Err(SimError::invalid_noise(format!(
            "damping branch masses sum to {}, expected 1",
            p0 + p1
        )));
    }

    let amps = state.amplitudes_mut();
    if r < p1 {
        // Decay branch: ground every |1⟩ amplitude.
        for i in 0..amps.len() {
            if i & qmask != 0 {
                amps[i & !qmask] = amps[i];
                amps[i] = Complex64::new(0.0, 0.0);
            }
        }
    } else {
        // No-decay branch: attenuate the |1⟩ population.
        for (i, a) in amps.iter_mut().enumerate() {
            if i & qmask != 0 {
                *a *= e0;
            }
        }
    }
    state.normalize();
    Ok(())
}

/// Two-qubit depolarizing: with probability p apply a uniform non-identity
/// Pauli pair
///
/// The surviving draw selects k = ⌊15·r/p⌋ + 1 in 1..=15; qubit 1 receives
/// {I,X,Y,Z}[k mod 4] and qubit 2 receives {I,X,Y,Z}[k div 4]. The
/// identity pair k = 0 is never selected, so the error cases are uniform
/// over the 15 non-trivial pairs.
pub fn two_qubit_depolarizing(
    state: &mut QubitState,
    qubit1: usize,
    qubit2: usize,
    p: f64,
    r: f64,
) -> Result<()> {
    state.check_qubit(qubit1)?;
    state.check_qubit(qubit2)?;
    check_probability(NoiseKind::TwoQubitDepolarizing, p)?;
    if r >= p {
        return Ok(());
    }

    let k = (15.0 * r / p) as usize + 1;
    apply_pauli(state, k % 4, qubit1);
    apply_pauli(state, k / 4, qubit2);
    Ok(())
}

/// Apply one single-qubit channel selected by kind
///
/// Used by the executor's dispatch loop; `TwoQubitDepolarizing` has its own
/// entry point and is rejected here.
pub fn apply_single_qubit_noise(
    state: &mut QubitState,
    kind: NoiseKind,
    qubit: usize,
    p: f64,
    r: f64,
) -> Result<()> {
    match kind {
        NoiseKind::Depolarizing => depolarizing(state, qubit, p, r),
        NoiseKind::Damping => amplitude_damping(state, qubit, p, r),
        NoiseKind::BitFlip => bit_flip(state, qubit, p, r),
        NoiseKind::PhaseFlip => phase_flip(state, qubit, p, r),
        NoiseKind::TwoQubitDepolarizing => Err(SimError::invalid_argument(
            "twoqubit_depolarizing cannot be applied to a single qubit".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use noisim_gates::matrices::HADAMARD;

    fn plus_state() -> QubitState {
        let mut state = QubitState::new(1).unwrap();
        state
            .apply_unitary_1q(0, &HADAMARD, &[], false)
            .unwrap();
        state
    }

    #[test]
    fn test_zero_probability_is_noop() {
        let mut state = plus_state();
        let before = state.amplitudes().to_vec();
        depolarizing(&mut state, 0, 0.0, 0.0).unwrap();
        bit_flip(&mut state, 0, 0.0, 0.0).unwrap();
        phase_flip(&mut state, 0, 0.0, 0.0).unwrap();
        // The Pauli channels skip the state entirely.
        assert_eq!(state.amplitudes(), before.as_slice());

        // Zero-γ damping still renormalizes, so compare with tolerance.
        amplitude_damping(&mut state, 0, 0.0, 0.5).unwrap();
        for (a, b) in state.amplitudes().iter().zip(&before) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bit_flip_branches() {
        let mut state = QubitState::new(1).unwrap();
        // Draw above p: no flip.
        bit_flip(&mut state, 0, 0.3, 0.9).unwrap();
        assert_relative_eq!(state.probability(0), 1.0, epsilon = 1e-12);
        // Draw below p: flip.
        bit_flip(&mut state, 0, 0.3, 0.1).unwrap();
        assert_relative_eq!(state.probability(1), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_flip_on_plus() {
        let mut state = plus_state();
        phase_flip(&mut state, 0, 1.0, 0.5).unwrap();
        // |+⟩ → |−⟩: second amplitude negated.
        assert_relative_eq!(
            state.amplitudes()[1].re,
            -std::f64::consts::FRAC_1_SQRT_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_depolarizing_branch_thresholds() {
        // p = 1: r in [0,1/3) → X, [1/3,2/3) → Y, [2/3,1) → Z.
        let mut state = QubitState::new(1).unwrap();
        depolarizing(&mut state, 0, 1.0, 0.1).unwrap();
        assert_relative_eq!(state.probability(1), 1.0, epsilon = 1e-12);

        let mut state = QubitState::new(1).unwrap();
        depolarizing(&mut state, 0, 1.0, 0.5).unwrap();
        assert_relative_eq!(state.probability(1), 1.0, epsilon = 1e-12);

        let mut state = QubitState::new(1).unwrap();
        depolarizing(&mut state, 0, 1.0, 0.9).unwrap();
        assert_relative_eq!(state.probability(0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_damping_no_decay_branch_renormalizes() {
        let mut state = plus_state();
        // p1 = γ/2 = 0.25; r above it takes the no-decay branch.
        amplitude_damping(&mut state, 0, 0.5, 0.9).unwrap();
        assert!(state.is_normalized(1e-10));
        // |1⟩ population shrank relative to |0⟩.
        assert!(state.probability(0) > state.probability(1));
        let expected_p1 = 0.5 * 0.5 / (0.5 + 0.5 * 0.5);
        assert_relative_eq!(state.probability(1), expected_p1, epsilon = 1e-12);
    }

    #[test]
    fn test_damping_decay_branch_grounds_qubit() {
        let mut state = plus_state();
        // p1 = 0.25; r below it takes the decay branch.
        amplitude_damping(&mut state, 0, 0.5, 0.1).unwrap();
        assert!(state.is_normalized(1e-10));
        assert_relative_eq!(state.probability(0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(state.probability(1), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_decay_branch_overwrites_zero_sibling() {
        // Two qubits, damping on qubit 0. Prepare amplitudes where every
        // basis state is populated so the overwrite is visible: a textbook
        // E1 would add |a_01|·√γ into a_00's magnitude; this kernel
        // replaces a_00 with a_01 outright, then renormalizes.
        let mut state = QubitState::new(2).unwrap();
        {
            let amps = state.amplitudes_mut();
            amps[0] = Complex64::new(0.1, 0.0);
            amps[1] = Complex64::new(0.7, 0.0);
            amps[2] = Complex64::new(0.1, 0.0);
            amps[3] = Complex64::new(0.7, 0.0);
        }
        state.normalize();
        let a01 = state.amplitudes()[1];
        let a11 = state.amplitudes()[3];

        // Force the decay branch (p1 = 0.98 for this state).
        amplitude_damping(&mut state, 0, 1.0, 0.0).unwrap();

        // Siblings hold exactly the old |1⟩ amplitudes, rescaled.
        let scale = 1.0 / (a01.norm_sqr() + a11.norm_sqr()).sqrt();
        assert_relative_eq!(state.amplitudes()[0].re, a01.re * scale, epsilon = 1e-12);
        assert_relative_eq!(state.amplitudes()[2].re, a11.re * scale, epsilon = 1e-12);
        assert_relative_eq!(state.amplitudes()[1].norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.amplitudes()[3].norm(), 0.0, epsilon = 1e-12);
        assert!(state.is_normalized(1e-10));
    }

    #[test]
    fn test_damping_rejects_corrupted_state() {
        let mut state = QubitState::new(1).unwrap();
        state.amplitudes_mut()[1] = Complex64::new(0.5, 0.0); // norm² = 1.25
        assert!(matches!(
            amplitude_damping(&mut state, 0, 0.3, 0.5),
            Err(SimError::InvalidNoise(_))
        ));
    }

    #[test]
    fn test_two_qubit_depolarizing_case_selection() {
        // p = 1, r chosen so k = 1: X on qubit 1, identity on qubit 2.
        let mut state = QubitState::new(2).unwrap();
        two_qubit_depolarizing(&mut state, 0, 1, 1.0, 0.05).unwrap();
        assert_relative_eq!(state.probability(1), 1.0, epsilon = 1e-12);

        // k = 4: identity on qubit 1, X on qubit 2.
        let mut state = QubitState::new(2).unwrap();
        two_qubit_depolarizing(&mut state, 0, 1, 1.0, 0.22).unwrap();
        assert_relative_eq!(state.probability(2), 1.0, epsilon = 1e-12);

        // k = 15: Z on both, |00⟩ unchanged.
        let mut state = QubitState::new(2).unwrap();
        two_qubit_depolarizing(&mut state, 0, 1, 1.0, 0.99).unwrap();
        assert_relative_eq!(state.probability(0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_probability() {
        let mut state = QubitState::new(1).unwrap();
        assert!(matches!(
            bit_flip(&mut state, 0, 1.5, 0.5),
            Err(SimError::InvalidNoise(_))
        ));
        assert!(matches!(
            depolarizing(&mut state, 0, -0.2, 0.5),
            Err(SimError::InvalidNoise(_))
        ));
    }

    #[test]
    fn test_out_of_range() {
        let mut state = QubitState::new(1).unwrap();
        assert!(matches!(
            bit_flip(&mut state, 3, 0.5, 0.5),
            Err(SimError::OutOfRange { .. })
        ));
    }
}

//! Noise channel kinds and their string decoding

use crate::error::{Result, SimError};
use std::fmt;
use std::str::FromStr;

/// The closed set of stochastic noise channels
///
/// Every channel is unravelled per shot: a single random draw selects a
/// branch operator, so the channel only matches its ensemble definition in
/// expectation over many shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoiseKind {
    /// Uniform Pauli error (X, Y or Z, each with probability p/3)
    Depolarizing,
    /// Amplitude damping towards |0⟩ with decay probability γ
    Damping,
    /// X with probability p
    BitFlip,
    /// Z with probability p
    PhaseFlip,
    /// Uniform non-identity Pauli pair on two qubits
    TwoQubitDepolarizing,
}

impl NoiseKind {
    /// Number of qubits a single channel application touches
    pub fn num_qubits(self) -> usize {
        match self {
            NoiseKind::TwoQubitDepolarizing => 2,
            _ => 1,
        }
    }

    /// Canonical channel name, as accepted by [`NoiseKind::from_str`]
    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Depolarizing => "depolarizing",
            NoiseKind::Damping => "damping",
            NoiseKind::BitFlip => "bitflip",
            NoiseKind::PhaseFlip => "phaseflip",
            NoiseKind::TwoQubitDepolarizing => "twoqubit_depolarizing",
        }
    }
}

impl FromStr for NoiseKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "depolarizing" => Ok(NoiseKind::Depolarizing),
            "damping" => Ok(NoiseKind::Damping),
            "bitflip" => Ok(NoiseKind::BitFlip),
            "phaseflip" => Ok(NoiseKind::PhaseFlip),
            "twoqubit_depolarizing" => Ok(NoiseKind::TwoQubitDepolarizing),
            _ => Err(SimError::invalid_argument(format!(
                "unknown noise name: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validate that a probability lies in [0,1]
pub fn check_probability(kind: NoiseKind, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::invalid_noise(format!(
            "{} probability must be in [0,1], got {}",
            kind, p
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for kind in [
            NoiseKind::Depolarizing,
            NoiseKind::Damping,
            NoiseKind::BitFlip,
            NoiseKind::PhaseFlip,
            NoiseKind::TwoQubitDepolarizing,
        ] {
            assert_eq!(kind.name().parse::<NoiseKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            "thermal".parse::<NoiseKind>(),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_probability_bounds() {
        assert!(check_probability(NoiseKind::BitFlip, 0.0).is_ok());
        assert!(check_probability(NoiseKind::BitFlip, 1.0).is_ok());
        assert!(matches!(
            check_probability(NoiseKind::BitFlip, 1.5),
            Err(SimError::InvalidNoise(_))
        ));
        assert!(matches!(
            check_probability(NoiseKind::Damping, -0.1),
            Err(SimError::InvalidNoise(_))
        ));
    }
}

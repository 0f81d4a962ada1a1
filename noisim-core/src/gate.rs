//! Gate kinds supported by the opcode recorder

use crate::error::{Result, SimError};
use std::fmt;
use std::str::FromStr;

/// The closed set of unitary gates the recorder understands
///
/// Each kind fixes its operand count (`num_qubits`) and the number of real
/// parameters it carries in an opcode (`num_params`). `U22` stores its four
/// complex matrix entries as eight reals; the rotation gates carry their
/// angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateKind {
    Identity,
    Hadamard,
    U22,
    X,
    Y,
    Z,
    Sx,
    Rx,
    Ry,
    Rz,
    Rphi90,
    Rphi180,
    Rphi,
    Cz,
    Cnot,
    Swap,
    Iswap,
    Xy,
    Toffoli,
    Cswap,
}

impl GateKind {
    /// Number of target qubits this gate acts on
    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::Identity
            | GateKind::Hadamard
            | GateKind::U22
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::Sx
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::Rz
            | GateKind::Rphi90
            | GateKind::Rphi180
            | GateKind::Rphi => 1,
            GateKind::Cz | GateKind::Cnot | GateKind::Swap | GateKind::Iswap | GateKind::Xy => 2,
            GateKind::Toffoli | GateKind::Cswap => 3,
        }
    }

    /// Number of real parameters carried by an opcode of this kind
    pub fn num_params(self) -> usize {
        match self {
            GateKind::U22 => 8,
            GateKind::Rx
            | GateKind::Ry
            | GateKind::Rz
            | GateKind::Rphi90
            | GateKind::Rphi180
            | GateKind::Xy => 1,
            GateKind::Rphi => 2,
            _ => 0,
        }
    }

    /// Canonical gate name, as accepted by [`GateKind::from_str`]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Identity => "IDENTITY",
            GateKind::Hadamard => "HADAMARD",
            GateKind::U22 => "U22",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::Sx => "SX",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Rphi90 => "RPHI90",
            GateKind::Rphi180 => "RPHI180",
            GateKind::Rphi => "RPHI",
            GateKind::Cz => "CZ",
            GateKind::Cnot => "CNOT",
            GateKind::Swap => "SWAP",
            GateKind::Iswap => "ISWAP",
            GateKind::Xy => "XY",
            GateKind::Toffoli => "TOFFOLI",
            GateKind::Cswap => "CSWAP",
        }
    }
}

impl FromStr for GateKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "IDENTITY" => Ok(GateKind::Identity),
            "HADAMARD" => Ok(GateKind::Hadamard),
            "U22" => Ok(GateKind::U22),
            "X" => Ok(GateKind::X),
            "Y" => Ok(GateKind::Y),
            "Z" => Ok(GateKind::Z),
            "SX" => Ok(GateKind::Sx),
            "RX" => Ok(GateKind::Rx),
            "RY" => Ok(GateKind::Ry),
            "RZ" => Ok(GateKind::Rz),
            "RPHI90" => Ok(GateKind::Rphi90),
            "RPHI180" => Ok(GateKind::Rphi180),
            "RPHI" => Ok(GateKind::Rphi),
            "CZ" => Ok(GateKind::Cz),
            "CNOT" => Ok(GateKind::Cnot),
            "SWAP" => Ok(GateKind::Swap),
            "ISWAP" => Ok(GateKind::Iswap),
            "XY" => Ok(GateKind::Xy),
            "TOFFOLI" => Ok(GateKind::Toffoli),
            "CSWAP" => Ok(GateKind::Cswap),
            _ => Err(SimError::invalid_argument(format!(
                "unknown gate name: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        let kinds = [
            GateKind::Identity,
            GateKind::Hadamard,
            GateKind::U22,
            GateKind::X,
            GateKind::Y,
            GateKind::Z,
            GateKind::Sx,
            GateKind::Rx,
            GateKind::Ry,
            GateKind::Rz,
            GateKind::Rphi90,
            GateKind::Rphi180,
            GateKind::Rphi,
            GateKind::Cz,
            GateKind::Cnot,
            GateKind::Swap,
            GateKind::Iswap,
            GateKind::Xy,
            GateKind::Toffoli,
            GateKind::Cswap,
        ];
        for kind in kinds {
            assert_eq!(kind.name().parse::<GateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "FOO".parse::<GateKind>().unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
    }

    #[test]
    fn test_arities() {
        assert_eq!(GateKind::Hadamard.num_qubits(), 1);
        assert_eq!(GateKind::Cnot.num_qubits(), 2);
        assert_eq!(GateKind::Toffoli.num_qubits(), 3);
        assert_eq!(GateKind::U22.num_params(), 8);
        assert_eq!(GateKind::Rphi.num_params(), 2);
        assert_eq!(GateKind::Xy.num_params(), 1);
        assert_eq!(GateKind::Cz.num_params(), 0);
    }
}

//! Error types shared across the noisim crates

use thiserror::Error;

/// Errors surfaced by recording, kernel and sampling operations
///
/// All errors are immediate: nothing is retried or recovered internally.
/// `InternalInconsistency` marks states that should be unreachable (for
/// example the basis sampler walking past the last amplitude) and is fatal
/// for the current simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A qubit index at or beyond the register size
    #[error("qubit index {qubit} out of range for {num_qubits}-qubit register")]
    OutOfRange { qubit: usize, num_qubits: usize },

    /// Unknown gate/noise name or malformed operand shape
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Noise parameter outside [0,1] or a Kraus branch sum off by more
    /// than the tolerance
    #[error("invalid noise parameter: {0}")]
    InvalidNoise(String),

    /// Reached a state the dispatch logic cannot account for
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl SimError {
    /// Create an out-of-range error for a qubit index
    pub fn out_of_range(qubit: usize, num_qubits: usize) -> Self {
        Self::OutOfRange { qubit, num_qubits }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid-noise error
    pub fn invalid_noise(msg: impl Into<String>) -> Self {
        Self::InvalidNoise(msg.into())
    }
}

/// Result type used throughout the workspace
pub type Result<T> = std::result::Result<T, SimError>;

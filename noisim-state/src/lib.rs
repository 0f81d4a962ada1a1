//! Dense state-vector kernel for the noisim simulator
//!
//! Owns the amplitude array and everything that touches it: controlled
//! unitary application, the stochastic noise channels, and basis sampling.
//! Randomness never originates here: channels and the sampler take their
//! draws as arguments, so the executor controls the draw order end to end.

pub mod channels;
pub mod kernels;
pub mod sampling;
pub mod state_vector;

pub use sampling::{compact_outcome, sample_basis_index};
pub use state_vector::{QubitState, MAX_QUBITS};

//! Shot-based noisy quantum circuit simulation
//!
//! Ties the workspace together: gates recorded on a [`NoisySimulator`] are
//! captured as opcodes with noise opcodes interleaved per the configured
//! [`NoiseModel`], then replayed shot by shot against the state-vector
//! kernel, with basis sampling and classical readout error on top.
//!
//! # Example
//!
//! ```
//! use noisim_core::{NoiseKind, NoiseModel};
//! use noisim_sim::NoisySimulator;
//!
//! // 1% depolarizing after every gate, 2% readout flip on the one qubit.
//! let model = NoiseModel::new().with_global(NoiseKind::Depolarizing, 0.01)?;
//! let mut sim = NoisySimulator::new(1, model)?
//!     .with_readout_error(&[[0.02, 0.02]])?
//!     .with_seed(42);
//!
//! sim.x(0, &[], false)?;
//! let hist = sim.measure_shots(2000)?;
//! assert!(hist.frequency(1) > 0.9);
//! # Ok::<(), noisim_core::SimError>(())
//! ```

pub mod result;
pub mod simulator;

pub use result::ShotHistogram;
pub use simulator::NoisySimulator;

// Re-exported for downstream convenience: building a simulator always
// starts from these.
pub use noisim_core::{GateKind, NoiseKind, NoiseModel, Result, SimError};

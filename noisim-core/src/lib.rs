//! Core types for the noisim quantum circuit simulator
//!
//! This crate defines the opcode model shared by the recorder and the
//! executor, the closed gate and noise taxonomies with their string
//! decodings, and the layered noise-model store that decides which noise
//! opcodes follow each recorded gate.
//!
//! # Example
//!
//! ```
//! use noisim_core::{GateKind, NoiseKind, NoiseModel, Opcode};
//!
//! let model = NoiseModel::new().with_global(NoiseKind::BitFlip, 0.05)?;
//!
//! // One gate record produces the gate opcode plus its follow-on noise.
//! let gate = Opcode::gate(GateKind::Hadamard, &[0], &[], false, &[]);
//! let noise = model.emit_noise_opcodes(GateKind::Hadamard, gate.qubits());
//! assert_eq!(noise.len(), 1);
//! # Ok::<(), noisim_core::SimError>(())
//! ```

pub mod error;
pub mod gate;
pub mod noise;
pub mod opcode;

pub use error::{Result, SimError};
pub use gate::GateKind;
pub use noise::{NoiseKind, NoiseModel};
pub use opcode::{OpKind, Opcode};

//! Noise kinds and the layered noise-model store
//!
//! Channels are described here only by kind and probability; the state
//! kernels that realize them live in `noisim-state`. The model resolves,
//! for each recorded gate, which noise opcodes follow it.

pub mod model;
pub mod types;

pub use model::NoiseModel;
pub use types::{check_probability, NoiseKind};

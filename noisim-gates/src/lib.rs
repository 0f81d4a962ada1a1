//! Gate matrices for the noisim simulator
//!
//! Fixed gates are compile-time constants; parameterized gates are built by
//! `#[inline]` generator functions. [`dispatch`] maps a
//! [`GateKind`](noisim_core::GateKind) plus its opcode parameters to the
//! concrete matrix the state kernel applies.

pub mod dispatch;
pub mod matrices;

pub use dispatch::{single_qubit_matrix, two_qubit_matrix};

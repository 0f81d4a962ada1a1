//! Layered noise descriptions and their resolution into noise opcodes
//!
//! A [`NoiseModel`] holds up to three layers of noise configuration:
//!
//! 1. **Global**: fires after every gate, on the gate's qubits.
//! 2. **Gate-dependent**: keyed by gate kind.
//! 3. **Gate-specific**: keyed by (gate kind, qubit) or
//!    (gate kind, qubit pair). The pair table doubles as a crosstalk
//!    description: a 1-qubit gate on `q` matching a pair key `(q, q')`
//!    injects noise on both `q` and `q'`.
//!
//! All layers that apply to a gate fire, in the order above. Within one
//! layer, entries fire in key order (the maps are ordered), which keeps the
//! recorded program deterministic for a given configuration.

use crate::error::{Result, SimError};
use crate::gate::GateKind;
use crate::noise::types::{check_probability, NoiseKind};
use crate::opcode::Opcode;
use std::collections::{BTreeMap, HashMap};

/// Per-noise-kind probabilities, ordered for deterministic emission
type NoiseEntry = BTreeMap<NoiseKind, f64>;

/// Layered noise configuration consulted at record time
///
/// Build one with the typed `with_*` methods, or decode the string-keyed
/// descriptions accepted by the `load_*` methods. Unknown gate or noise
/// names fail with `InvalidArgument`; probabilities outside [0,1] fail with
/// `InvalidNoise`.
///
/// # Example
///
/// ```
/// use noisim_core::{GateKind, NoiseKind, NoiseModel};
///
/// let model = NoiseModel::new()
///     .with_global(NoiseKind::Depolarizing, 0.01)?
///     .with_gate_noise(GateKind::Hadamard, NoiseKind::BitFlip, 0.02)?;
/// assert!(!model.is_empty());
/// # Ok::<(), noisim_core::SimError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoiseModel {
    global: NoiseEntry,
    gate_dependent: BTreeMap<GateKind, NoiseEntry>,
    gate_error_1q: BTreeMap<(GateKind, usize), NoiseEntry>,
    gate_error_2q: BTreeMap<(GateKind, (usize, usize)), NoiseEntry>,
}

impl NoiseModel {
    /// Create an empty model (no noise fires)
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no layer holds any entry
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
            && self.gate_dependent.is_empty()
            && self.gate_error_1q.is_empty()
            && self.gate_error_2q.is_empty()
    }

    /// Add a global noise entry, fired after every gate
    ///
    /// Only the single-qubit kinds are meaningful here: the global layer
    /// targets whatever qubit tuple the gate touched, so a two-qubit
    /// channel cannot be attached to it.
    pub fn with_global(mut self, kind: NoiseKind, p: f64) -> Result<Self> {
        if kind.num_qubits() != 1 {
            return Err(SimError::invalid_argument(format!(
                "{} cannot be used as global noise",
                kind
            )));
        }
        check_probability(kind, p)?;
        self.global.insert(kind, p);
        Ok(self)
    }

    /// Add a gate-dependent noise entry, fired after gates of `gate` kind
    pub fn with_gate_noise(mut self, gate: GateKind, kind: NoiseKind, p: f64) -> Result<Self> {
        if kind.num_qubits() == 2 && gate.num_qubits() != 2 {
            return Err(SimError::invalid_argument(format!(
                "{} requires a 2-qubit gate kind, {} acts on {}",
                kind,
                gate,
                gate.num_qubits()
            )));
        }
        check_probability(kind, p)?;
        self.gate_dependent.entry(gate).or_default().insert(kind, p);
        Ok(self)
    }

    /// Add a gate+qubit-specific entry
    ///
    /// The key may name a 2-qubit gate kind: that models local error on one
    /// participant of a two-qubit operation.
    pub fn with_gate_error_1q(
        mut self,
        gate: GateKind,
        qubit: usize,
        kind: NoiseKind,
        p: f64,
    ) -> Result<Self> {
        if gate.num_qubits() > 2 {
            return Err(SimError::invalid_argument(format!(
                "gate-specific noise supports 1- and 2-qubit gates, {} acts on {}",
                gate,
                gate.num_qubits()
            )));
        }
        if kind.num_qubits() != 1 {
            return Err(SimError::invalid_argument(format!(
                "{} cannot target a single qubit",
                kind
            )));
        }
        check_probability(kind, p)?;
        self.gate_error_1q
            .entry((gate, qubit))
            .or_default()
            .insert(kind, p);
        Ok(self)
    }

    /// Add a gate+qubit-pair-specific entry
    ///
    /// When `gate` is a 1-qubit kind, the entry describes crosstalk: a gate
    /// on the pair's first qubit injects noise on both.
    pub fn with_gate_error_2q(
        mut self,
        gate: GateKind,
        qubits: (usize, usize),
        kind: NoiseKind,
        p: f64,
    ) -> Result<Self> {
        if gate.num_qubits() > 2 {
            return Err(SimError::invalid_argument(format!(
                "gate-specific noise supports 1- and 2-qubit gates, {} acts on {}",
                gate,
                gate.num_qubits()
            )));
        }
        check_probability(kind, p)?;
        self.gate_error_2q
            .entry((gate, qubits))
            .or_default()
            .insert(kind, p);
        Ok(self)
    }

    /// Decode a global noise description (`noise name → probability`)
    pub fn load_description(mut self, desc: &HashMap<String, f64>) -> Result<Self> {
        for (name, &p) in desc {
            self = self.with_global(name.parse()?, p)?;
        }
        Ok(self)
    }

    /// Decode a gate-dependent description (`gate name → noise name → p`)
    pub fn load_gate_noise_description(
        mut self,
        desc: &HashMap<String, HashMap<String, f64>>,
    ) -> Result<Self> {
        for (gate_name, noises) in desc {
            let gate: GateKind = gate_name.parse()?;
            for (noise_name, &p) in noises {
                self = self.with_gate_noise(gate, noise_name.parse()?, p)?;
            }
        }
        Ok(self)
    }

    /// Decode a gate+qubit-specific description
    pub fn load_gate_error1q_description(
        mut self,
        desc: &HashMap<(String, usize), HashMap<String, f64>>,
    ) -> Result<Self> {
        for ((gate_name, qubit), noises) in desc {
            let gate: GateKind = gate_name.parse()?;
            for (noise_name, &p) in noises {
                self = self.with_gate_error_1q(gate, *qubit, noise_name.parse()?, p)?;
            }
        }
        Ok(self)
    }

    /// Decode a gate+qubit-pair-specific description
    pub fn load_gate_error2q_description(
        mut self,
        desc: &HashMap<(String, (usize, usize)), HashMap<String, f64>>,
    ) -> Result<Self> {
        for ((gate_name, qubits), noises) in desc {
            let gate: GateKind = gate_name.parse()?;
            for (noise_name, &p) in noises {
                self = self.with_gate_error_2q(gate, *qubits, noise_name.parse()?, p)?;
            }
        }
        Ok(self)
    }

    /// Resolve the noise opcodes that follow one recorded gate
    ///
    /// Layers fire in order global → gate-dependent → gate-specific. For a
    /// 1-qubit gate the specific layer fires the `(gate, q)` entry and then
    /// scans the pair table for crosstalk keys `(gate, (q, q'))`. For a
    /// 2-qubit gate it fires the `(gate, (q1, q2))` entry and then the
    /// per-participant `(gate, q1)` and `(gate, q2)` entries. Gates on
    /// three qubits only see the first two layers: the specific tables
    /// reject 3-qubit keys at load time, so nothing there can match.
    pub fn emit_noise_opcodes(&self, gate: GateKind, qubits: &[usize]) -> Vec<Opcode> {
        let mut out = Vec::new();

        for (&kind, &p) in &self.global {
            out.push(Opcode::noise(kind, qubits, p));
        }

        if let Some(entry) = self.gate_dependent.get(&gate) {
            push_entry(&mut out, entry, qubits);
        }

        match *qubits {
            [q] => {
                if let Some(entry) = self.gate_error_1q.get(&(gate, q)) {
                    push_entry(&mut out, entry, &[q]);
                }
                for (&(g, (q1, q2)), entry) in &self.gate_error_2q {
                    if g == gate && q1 == q {
                        push_entry(&mut out, entry, &[q1, q2]);
                    }
                }
            }
            [q1, q2] => {
                if let Some(entry) = self.gate_error_2q.get(&(gate, (q1, q2))) {
                    push_entry(&mut out, entry, &[q1, q2]);
                }
                if let Some(entry) = self.gate_error_1q.get(&(gate, q1)) {
                    push_entry(&mut out, entry, &[q1]);
                }
                if let Some(entry) = self.gate_error_1q.get(&(gate, q2)) {
                    push_entry(&mut out, entry, &[q2]);
                }
            }
            _ => {}
        }

        out
    }
}

fn push_entry(out: &mut Vec<Opcode>, entry: &NoiseEntry, qubits: &[usize]) {
    for (&kind, &p) in entry {
        out.push(Opcode::noise(kind, qubits, p));
    }
}

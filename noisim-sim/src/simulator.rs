//! The noisy simulator: opcode recorder, executor and shot loop
//!
//! Recording and execution are separate phases. Gate methods append opcodes
//! to the program and immediately interleave whatever noise opcodes the
//! model resolves for them; nothing touches the state vector until
//! [`NoisySimulator::execute_once`] or the shot loop walks the program.

use noisim_core::{GateKind, NoiseKind, NoiseModel, OpKind, Opcode, Result, SimError};
use noisim_gates::matrices;
use noisim_gates::{single_qubit_matrix, two_qubit_matrix};
use noisim_state::channels;
use noisim_state::{compact_outcome, sample_basis_index, QubitState};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::result::ShotHistogram;

/// Shot-based noisy quantum circuit simulator
///
/// Owns the opcode program, the noise model consulted at record time, the
/// dense state vector and an explicit random stream. Each shot resets the
/// state to |0…0⟩, replays the program (noise opcodes drawing fresh
/// branches every time) and samples one outcome.
///
/// # Example
///
/// ```
/// use noisim_core::NoiseModel;
/// use noisim_sim::NoisySimulator;
///
/// let mut sim = NoisySimulator::new(2, NoiseModel::new())?.with_seed(7);
/// sim.hadamard(0, &[], false)?;
/// sim.cnot(0, 1, &[], false)?;
///
/// let hist = sim.measure_shots(1000)?;
/// // Bell state: only |00⟩ and |11⟩ appear.
/// assert_eq!(hist.count(1) + hist.count(2), 0);
/// # Ok::<(), noisim_core::SimError>(())
/// ```
pub struct NoisySimulator {
    num_qubits: usize,
    model: NoiseModel,
    readout_error: Vec<[f64; 2]>,
    program: Vec<Opcode>,
    pure_program: Vec<Opcode>,
    measure_qubits: Vec<usize>,
    state: QubitState,
    rng: StdRng,
}

impl NoisySimulator {
    /// Create a simulator over `num_qubits` qubits with the given noise model
    ///
    /// The random stream is seeded from entropy; use
    /// [`with_seed`](Self::with_seed) for reproducible runs.
    pub fn new(num_qubits: usize, model: NoiseModel) -> Result<Self> {
        Ok(Self {
            num_qubits,
            model,
            readout_error: Vec::new(),
            program: Vec::new(),
            pure_program: Vec::new(),
            measure_qubits: Vec::new(),
            state: QubitState::new(num_qubits)?,
            rng: StdRng::from_entropy(),
        })
    }

    /// Reseed the random stream for reproducible shot sequences
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Attach a per-qubit readout-error table
    ///
    /// Each row is `[p_{0→1}, p_{1→0}]` for one qubit. The table must be
    /// empty (readout error disabled) or hold exactly one row per qubit.
    pub fn with_readout_error(mut self, table: &[[f64; 2]]) -> Result<Self> {
        if !table.is_empty() && table.len() != self.num_qubits {
            return Err(SimError::invalid_argument(format!(
                "readout table has {} rows, register has {} qubits",
                table.len(),
                self.num_qubits
            )));
        }
        for (qubit, row) in table.iter().enumerate() {
            for &p in row {
                if !(0.0..=1.0).contains(&p) {
                    return Err(SimError::invalid_noise(format!(
                        "readout probability for qubit {} must be in [0,1], got {}",
                        qubit, p
                    )));
                }
            }
        }
        self.readout_error = table.to_vec();
        Ok(self)
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The state vector after the most recent `execute_once`
    pub fn state(&self) -> &QubitState {
        &self.state
    }

    /// The recorded program, noise opcodes included
    pub fn program(&self) -> &[Opcode] {
        &self.program
    }

    /// The gate-only counterpart of the program
    pub fn pure_program(&self) -> &[Opcode] {
        &self.pure_program
    }

    /// The noise model consulted at record time
    pub fn model(&self) -> &NoiseModel {
        &self.model
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(SimError::out_of_range(qubit, self.num_qubits));
        }
        Ok(())
    }

    /// Append a gate opcode plus its follow-on noise opcodes
    fn record_gate(
        &mut self,
        kind: GateKind,
        qubits: &[usize],
        params: &[f64],
        dagger: bool,
        controllers: &[usize],
    ) -> Result<()> {
        for (i, &q) in qubits.iter().enumerate() {
            self.check_qubit(q)?;
            if qubits[..i].contains(&q) {
                return Err(SimError::invalid_argument(format!(
                    "duplicate target qubit {} for {}",
                    q, kind
                )));
            }
        }
        for &c in controllers {
            self.check_qubit(c)?;
            if qubits.contains(&c) {
                return Err(SimError::invalid_argument(format!(
                    "controller qubit {} overlaps a target of {}",
                    c, kind
                )));
            }
        }

        let op = Opcode::gate(kind, qubits, params, dagger, controllers);
        self.pure_program.push(op.clone());
        self.program.push(op);
        self.program
            .extend(self.model.emit_noise_opcodes(kind, qubits));
        Ok(())
    }

    /// Record a named gate, decoding the name and checking operand shape
    pub fn load_opcode(
        &mut self,
        name: &str,
        qubits: &[usize],
        params: &[f64],
        dagger: bool,
        controllers: &[usize],
    ) -> Result<()> {
        let kind: GateKind = name.parse()?;
        if qubits.len() != kind.num_qubits() {
            return Err(SimError::invalid_argument(format!(
                "{} expects {} qubits, got {}",
                kind,
                kind.num_qubits(),
                qubits.len()
            )));
        }
        if params.len() != kind.num_params() {
            return Err(SimError::invalid_argument(format!(
                "{} expects {} parameters, got {}",
                kind,
                kind.num_params(),
                params.len()
            )));
        }
        self.record_gate(kind, qubits, params, dagger, controllers)
    }

    /// Record the measurement selection; no opcode is emitted
    pub fn measure(&mut self, qubits: &[usize]) -> Result<()> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        self.measure_qubits = qubits.to_vec();
        Ok(())
    }

    // Gate recording methods. Every method takes the controller list and
    // dagger flag; pass `&[], false` for a plain application.

    pub fn identity(&mut self, qn: usize, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Identity, &[qn], &[], dagger, controllers)
    }

    pub fn hadamard(&mut self, qn: usize, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Hadamard, &[qn], &[], dagger, controllers)
    }

    /// Arbitrary single-qubit unitary from four row-major entries
    pub fn u22(
        &mut self,
        qn: usize,
        unitary: &[Complex64; 4],
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        let params = [
            unitary[0].re,
            unitary[0].im,
            unitary[1].re,
            unitary[1].im,
            unitary[2].re,
            unitary[2].im,
            unitary[3].re,
            unitary[3].im,
        ];
        self.record_gate(GateKind::U22, &[qn], &params, dagger, controllers)
    }

    pub fn x(&mut self, qn: usize, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::X, &[qn], &[], dagger, controllers)
    }

    pub fn y(&mut self, qn: usize, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Y, &[qn], &[], dagger, controllers)
    }

    pub fn z(&mut self, qn: usize, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Z, &[qn], &[], dagger, controllers)
    }

    pub fn sx(&mut self, qn: usize, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Sx, &[qn], &[], dagger, controllers)
    }

    pub fn rx(&mut self, qn: usize, theta: f64, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Rx, &[qn], &[theta], dagger, controllers)
    }

    pub fn ry(&mut self, qn: usize, theta: f64, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Ry, &[qn], &[theta], dagger, controllers)
    }

    pub fn rz(&mut self, qn: usize, theta: f64, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Rz, &[qn], &[theta], dagger, controllers)
    }

    pub fn rphi90(
        &mut self,
        qn: usize,
        phi: f64,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Rphi90, &[qn], &[phi], dagger, controllers)
    }

    pub fn rphi180(
        &mut self,
        qn: usize,
        phi: f64,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Rphi180, &[qn], &[phi], dagger, controllers)
    }

    /// Rotation by θ about the axis at angle φ in the XY plane
    pub fn rphi(
        &mut self,
        qn: usize,
        phi: f64,
        theta: f64,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Rphi, &[qn], &[phi, theta], dagger, controllers)
    }

    pub fn cz(&mut self, qn1: usize, qn2: usize, controllers: &[usize], dagger: bool) -> Result<()> {
        self.record_gate(GateKind::Cz, &[qn1, qn2], &[], dagger, controllers)
    }

    pub fn cnot(
        &mut self,
        controller: usize,
        target: usize,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Cnot, &[controller, target], &[], dagger, controllers)
    }

    pub fn swap(
        &mut self,
        qn1: usize,
        qn2: usize,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Swap, &[qn1, qn2], &[], dagger, controllers)
    }

    pub fn iswap(
        &mut self,
        qn1: usize,
        qn2: usize,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Iswap, &[qn1, qn2], &[], dagger, controllers)
    }

    pub fn xy(
        &mut self,
        qn1: usize,
        qn2: usize,
        theta: f64,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Xy, &[qn1, qn2], &[theta], dagger, controllers)
    }

    pub fn toffoli(
        &mut self,
        qn1: usize,
        qn2: usize,
        target: usize,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(GateKind::Toffoli, &[qn1, qn2, target], &[], dagger, controllers)
    }

    pub fn cswap(
        &mut self,
        controller: usize,
        target1: usize,
        target2: usize,
        controllers: &[usize],
        dagger: bool,
    ) -> Result<()> {
        self.record_gate(
            GateKind::Cswap,
            &[controller, target1, target2],
            &[],
            dagger,
            controllers,
        )
    }

    /// Run the program once against a fresh |0…0⟩ state
    ///
    /// Gate opcodes dispatch to the unitary kernels; noise opcodes draw
    /// their branch and apply the matching channel, one draw per listed
    /// qubit in order. The final state stays available through
    /// [`state`](Self::state).
    pub fn execute_once(&mut self) -> Result<()> {
        trace!(opcodes = self.program.len(), "executing program");
        self.state.reset();
        for op in &self.program {
            apply_opcode(op, &mut self.state, &mut self.rng)?;
        }
        Ok(())
    }

    /// Sample one outcome from the current state, readout error applied
    ///
    /// One draw selects the basis index; if a readout table is attached,
    /// one further draw per qubit decides the classical flips. Always
    /// returns the full n-bit outcome; projection onto a measurement
    /// selection happens in the shot loop.
    pub fn get_measure(&mut self) -> Result<usize> {
        let r = self.rng.gen::<f64>();
        let mut outcome = sample_basis_index(&self.state, r)?;

        for (qubit, row) in self.readout_error.iter().enumerate() {
            let r = self.rng.gen::<f64>();
            let bit = 1usize << qubit;
            if outcome & bit != 0 {
                if r < row[1] {
                    outcome &= !bit;
                }
            } else if r < row[0] {
                outcome |= bit;
            }
        }
        Ok(outcome)
    }

    /// Run the shot loop using the recorded measurement selection
    ///
    /// With no selection recorded, full n-bit outcomes are tallied.
    pub fn measure_shots(&mut self, shots: usize) -> Result<ShotHistogram> {
        let measure_qubits = self.measure_qubits.clone();
        self.run_shots(&measure_qubits, shots)
    }

    /// Run the shot loop reporting only the listed qubits, in list order
    pub fn measure_shots_on(
        &mut self,
        measure_list: &[usize],
        shots: usize,
    ) -> Result<ShotHistogram> {
        for &q in measure_list {
            self.check_qubit(q)?;
        }
        self.measure_qubits = measure_list.to_vec();
        self.run_shots(measure_list, shots)
    }

    fn run_shots(&mut self, measure_qubits: &[usize], shots: usize) -> Result<ShotHistogram> {
        debug!(
            shots,
            opcodes = self.program.len(),
            measured = measure_qubits.len(),
            "running shot loop"
        );
        let mut histogram = ShotHistogram::new();
        for _ in 0..shots {
            self.execute_once()?;
            let mut outcome = self.get_measure()?;
            if !measure_qubits.is_empty() {
                outcome = compact_outcome(outcome, measure_qubits);
            }
            histogram.record(outcome);
        }
        Ok(histogram)
    }
}

/// Dispatch one opcode against the state
///
/// Free function so the program can be iterated while the state and the
/// random stream are borrowed mutably.
fn apply_opcode(op: &Opcode, state: &mut QubitState, rng: &mut StdRng) -> Result<()> {
    match op.kind() {
        OpKind::Noise(kind) => {
            let p = op.params()[0];
            match kind {
                NoiseKind::TwoQubitDepolarizing => {
                    let qubits = op.qubits();
                    if qubits.len() != 2 {
                        return Err(SimError::invalid_argument(format!(
                            "twoqubit_depolarizing expects 2 qubits, got {}",
                            qubits.len()
                        )));
                    }
                    let r = rng.gen::<f64>();
                    channels::two_qubit_depolarizing(state, qubits[0], qubits[1], p, r)
                }
                _ => {
                    for &q in op.qubits() {
                        let r = rng.gen::<f64>();
                        channels::apply_single_qubit_noise(state, kind, q, p, r)?;
                    }
                    Ok(())
                }
            }
        }
        OpKind::Gate(kind) => match kind {
            GateKind::Identity => Ok(()),
            GateKind::Toffoli => {
                let qubits = op.qubits();
                let mut controllers = op.controllers().to_vec();
                controllers.extend_from_slice(&qubits[..2]);
                state.apply_unitary_1q(qubits[2], &matrices::PAULI_X, &controllers, op.dagger())
            }
            GateKind::Cswap => {
                let qubits = op.qubits();
                let mut controllers = op.controllers().to_vec();
                controllers.push(qubits[0]);
                state.apply_unitary_2q(
                    qubits[1],
                    qubits[2],
                    &matrices::SWAP,
                    &controllers,
                    op.dagger(),
                )
            }
            kind if kind.num_qubits() == 1 => {
                let matrix = single_qubit_matrix(kind, op.params())?;
                state.apply_unitary_1q(op.qubits()[0], &matrix, op.controllers(), op.dagger())
            }
            kind => {
                let matrix = two_qubit_matrix(kind, op.params())?;
                state.apply_unitary_2q(
                    op.qubits()[0],
                    op.qubits()[1],
                    &matrix,
                    op.controllers(),
                    op.dagger(),
                )
            }
        },
    }
}

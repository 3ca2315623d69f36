//! Statevector simulator
//!
//! Executes circuits shot by shot on a dense state vector. Measurements and
//! resets collapse the state mid-circuit, so classically conditioned gates
//! see the outcomes recorded earlier in the same shot.
use std::collections::HashMap;
use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::counts::Counts;
use crate::error::{Error, Result};
use crate::quantum::circuit::{Condition, Instruction, QuantumCircuit};
use crate::quantum::state::{StateVector, EPSILON};

/// A measurement outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// Measurement yielded 0
    Zero,
    /// Measurement yielded 1
    One,
}

impl Outcome {
    pub fn bit(self) -> u8 {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => write!(f, "0"),
            Outcome::One => write!(f, "1"),
        }
    }
}

/// An outcome of measuring multiple qubits
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementOutcome {
    /// The outcomes for each measured qubit
    pub outcomes: Vec<Outcome>,
    /// The probability of this outcome
    pub probability: f64,
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            write!(f, "{}", outcome)?;
        }
        write!(f, " (p={})", self.probability)
    }
}

/// Circuit lowered to full-system operators, shared by every shot
enum Step {
    Unitary {
        matrix: Array2<Complex64>,
        condition: Option<Condition>,
    },
    Measure {
        qubit: usize,
        clbit: usize,
    },
    Reset {
        qubit: usize,
    },
}

fn compile(circuit: &QuantumCircuit) -> Vec<Step> {
    let total = circuit.num_qubits();
    circuit
        .instructions()
        .iter()
        .filter_map(|inst| match inst {
            Instruction::Gate { gate, qubits, condition } => Some(Step::Unitary {
                matrix: gate.tensor_to_full_system(total, qubits),
                condition: *condition,
            }),
            Instruction::Measure { qubit, clbit } => Some(Step::Measure {
                qubit: *qubit,
                clbit: *clbit,
            }),
            Instruction::Reset { qubit } => Some(Step::Reset { qubit: *qubit }),
            Instruction::Barrier { .. } => None,
        })
        .collect()
}

/// Sample a computational-basis outcome for `qubit` and collapse onto it
fn measure_qubit<R: Rng>(state: &mut StateVector, qubit: usize, rng: &mut R) -> Result<Outcome> {
    let p_one = state.probability_of_one(qubit)?;
    let outcome = if p_one < EPSILON {
        Outcome::Zero
    } else if p_one > 1.0 - EPSILON {
        Outcome::One
    } else if rng.gen::<f64>() < p_one {
        Outcome::One
    } else {
        Outcome::Zero
    };

    state.collapse(qubit, outcome.bit())?;
    Ok(outcome)
}

/// A statevector simulator for quantum circuits
#[derive(Debug, Clone, Default)]
pub struct StatevectorSimulator {
    /// Base seed; shot `k` uses a generator derived from `seed + k`
    seed: Option<u64>,
}

impl StatevectorSimulator {
    /// Create a simulator drawing fresh entropy for every run
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator whose runs are reproducible
    pub fn with_seed(seed: u64) -> Self {
        StatevectorSimulator { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Run `shots` independent executions and histogram the classical bits
    pub fn run(&self, circuit: &QuantumCircuit, shots: usize) -> Result<Counts> {
        if shots == 0 {
            return Err(Error::ZeroShots);
        }

        let base_seed = self.seed.unwrap_or_else(rand::random);
        let steps = compile(circuit);
        debug!(
            shots,
            qubits = circuit.num_qubits(),
            clbits = circuit.num_clbits(),
            steps = steps.len(),
            "running circuit"
        );

        let counts = (0..shots)
            .into_par_iter()
            .map(|shot| -> Result<String> {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(shot as u64));
                let bits = Self::run_shot(circuit, &steps, &mut rng)?;
                Ok(circuit.format_bits(&bits))
            })
            .try_fold(Counts::new, |mut counts, key| -> Result<Counts> {
                counts.add(key?, 1);
                Ok(counts)
            })
            .try_reduce(Counts::new, |a, b| Ok(a.merge(b)))?;

        debug!(outcomes = counts.len(), "run complete");
        Ok(counts)
    }

    fn run_shot<R: Rng>(circuit: &QuantumCircuit, steps: &[Step], rng: &mut R) -> Result<Vec<u8>> {
        let mut state = StateVector::zero_state(circuit.num_qubits());
        let mut bits = vec![0u8; circuit.num_clbits()];

        for step in steps {
            match step {
                Step::Unitary { matrix, condition } => {
                    if let Some(cond) = condition {
                        if circuit.register_value(cond.register, &bits) != cond.value {
                            continue;
                        }
                    }
                    state = state.apply_matrix(matrix)?;
                }
                Step::Measure { qubit, clbit } => {
                    let outcome = measure_qubit(&mut state, *qubit, rng)?;
                    trace!(qubit, clbit, %outcome, "measured");
                    bits[*clbit] = outcome.bit();
                }
                Step::Reset { qubit } => {
                    if measure_qubit(&mut state, *qubit, rng)? == Outcome::One {
                        state.flip(*qubit)?;
                    }
                }
            }
        }

        Ok(bits)
    }

    /// Final state of a circuit made only of unconditioned gates
    pub fn final_state(&self, circuit: &QuantumCircuit) -> Result<StateVector> {
        if !circuit.is_unitary() {
            return Err(Error::MidCircuitMeasurement);
        }

        let mut state = StateVector::zero_state(circuit.num_qubits());
        for inst in circuit.instructions() {
            if let Instruction::Gate { gate, qubits, .. } = inst {
                state = gate.apply_to_qubits(&state, qubits)?;
            }
        }
        Ok(state)
    }

    /// Exact outcome distribution over `qubits` for a unitary circuit,
    /// most likely outcome first
    pub fn probabilities(&self, circuit: &QuantumCircuit, qubits: &[usize]) -> Result<Vec<MeasurementOutcome>> {
        let state = self.final_state(circuit)?;
        for &q in qubits {
            if q >= state.qubit_count() {
                return Err(Error::QubitOutOfRange {
                    index: q,
                    size: state.qubit_count(),
                });
            }
        }

        let mut probabilities: HashMap<Vec<Outcome>, f64> = HashMap::new();
        for i in 0..state.dimension() {
            let prob = state.probability(i);
            if prob > EPSILON {
                let outcomes = qubits
                    .iter()
                    .map(|&q| {
                        if (i >> state.shift_of(q)) & 1 == 0 {
                            Outcome::Zero
                        } else {
                            Outcome::One
                        }
                    })
                    .collect();
                *probabilities.entry(outcomes).or_insert(0.0) += prob;
            }
        }

        let mut outcomes: Vec<MeasurementOutcome> = probabilities
            .into_iter()
            .map(|(outcomes, probability)| MeasurementOutcome { outcomes, probability })
            .collect();

        outcomes.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then_with(|| a.outcomes.cmp(&b.outcomes))
        });

        Ok(outcomes)
    }
}

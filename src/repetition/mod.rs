//! Two-qubit repetition code with a shared link qubit
//!
//! A Bell pair on the code qubits is hit by one error gate per qubit, then
//! checked by two rounds of parity extraction through the link qubit. A
//! parity violation in round one triggers a classically conditioned X on
//! the second code qubit before round two re-checks.

pub mod syndrome;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::counts::Counts;
use crate::error::{Error, Result};
use crate::quantum::circuit::{CircuitBuilder, QuantumCircuit};
use crate::simulators::StatevectorSimulator;

pub use syndrome::{split_key, LogicalReadout, SyndromeOutcome, VariantReport};

pub const CODE_QUBITS: &str = "code_qubit";
pub const LINK_QUBITS: &str = "link_qubit";
pub const CODE_BITS: &str = "code_bit";
pub const ROUND_LINK_BITS: &str = "round_link_bit";

/// Number of error gates that can be injected on a code qubit
pub const ERROR_CHOICES: usize = 3;

/// Error injected on a code qubit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorGate {
    Identity,
    BitFlip,
    PhaseFlip,
}

impl ErrorGate {
    pub const ALL: [ErrorGate; ERROR_CHOICES] =
        [ErrorGate::Identity, ErrorGate::BitFlip, ErrorGate::PhaseFlip];

    /// 0 = identity, 1 = bit flip, 2 = phase flip
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidErrorIndex(index))
    }

    pub fn index(self) -> usize {
        match self {
            ErrorGate::Identity => 0,
            ErrorGate::BitFlip => 1,
            ErrorGate::PhaseFlip => 2,
        }
    }

    /// Append this error's gate on `qubit`
    pub fn apply(self, circuit: &mut QuantumCircuit, qubit: usize) -> Result<()> {
        match self {
            ErrorGate::Identity => circuit.i(qubit),
            ErrorGate::BitFlip => circuit.x(qubit),
            ErrorGate::PhaseFlip => circuit.z(qubit),
        }
    }

    /// Whether the error changes the ZZ parity of the code qubits
    pub fn flips_parity(self) -> bool {
        matches!(self, ErrorGate::BitFlip)
    }
}

impl fmt::Display for ErrorGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorGate::Identity => write!(f, "I"),
            ErrorGate::BitFlip => write!(f, "X"),
            ErrorGate::PhaseFlip => write!(f, "Z"),
        }
    }
}

/// Build the syndrome circuit with `first` on code qubit 0 and `second`
/// on code qubit 1
pub fn build_syndrome_circuit(first: ErrorGate, second: ErrorGate) -> Result<QuantumCircuit> {
    let mut qc = CircuitBuilder::new()
        .qreg(CODE_QUBITS, 2)
        .qreg(LINK_QUBITS, 1)
        .creg(CODE_BITS, 2)
        .creg(ROUND_LINK_BITS, 2)
        .build()?;

    let cq0 = qc.qubit(CODE_QUBITS, 0)?;
    let cq1 = qc.qubit(CODE_QUBITS, 1)?;
    let lq0 = qc.qubit(LINK_QUBITS, 0)?;
    let rlb0 = qc.clbit(ROUND_LINK_BITS, 0)?;
    let rlb1 = qc.clbit(ROUND_LINK_BITS, 1)?;

    // Bell pair, then the injected errors
    qc.h(cq0)?;
    qc.cx(cq0, cq1)?;
    first.apply(&mut qc, cq0)?;
    second.apply(&mut qc, cq1)?;
    qc.barrier();

    // Round one: parity onto the link, correct on violation
    qc.cx_many(&[cq0, cq1], &[lq0, lq0])?;
    qc.measure(lq0, rlb0)?;
    qc.x(cq1)?;
    qc.c_if(ROUND_LINK_BITS, 1)?;
    qc.barrier();

    // Round two on a fresh link
    qc.reset(lq0)?;
    qc.cx_many(&[cq0, cq1], &[lq0, lq0])?;
    qc.measure(lq0, rlb1)?;
    qc.measure_register(CODE_QUBITS, CODE_BITS)?;

    Ok(qc)
}

/// Round-link bits every shot of a noiseless run must report
pub fn expected_syndrome(first: ErrorGate, second: ErrorGate) -> SyndromeOutcome {
    if first.flips_parity() != second.flips_parity() {
        SyndromeOutcome::Corrected
    } else {
        SyndromeOutcome::NoError
    }
}

/// One cell of the 3x3 sweep
#[derive(Debug, Clone, Serialize)]
pub struct VariantResult {
    /// Error index on code qubit 0
    pub i: usize,
    /// Error index on code qubit 1
    pub j: usize,
    pub errors: (ErrorGate, ErrorGate),
    #[serde(skip)]
    pub circuit: QuantumCircuit,
    pub counts: Counts,
    pub report: VariantReport,
}

impl VariantResult {
    /// Banner printed before each variant
    pub fn title(&self) -> String {
        format!("========= circuit[ {} ][ {} ]=========", self.i, self.j)
    }
}

/// Build and run one variant
pub fn run_variant(simulator: &StatevectorSimulator, i: usize, j: usize, shots: usize) -> Result<VariantResult> {
    let errors = (ErrorGate::from_index(i)?, ErrorGate::from_index(j)?);
    let circuit = build_syndrome_circuit(errors.0, errors.1)?;
    debug!(i, j, instructions = circuit.instructions().len(), "built syndrome circuit");

    let counts = simulator.run(&circuit, shots)?;
    let report = VariantReport::from_counts(&counts);
    info!(i, j, first = %errors.0, second = %errors.1, outcomes = counts.len(), "variant complete");

    Ok(VariantResult {
        i,
        j,
        errors,
        circuit,
        counts,
        report,
    })
}

/// Run every selected variant in row-major order
pub fn sweep(config: &RunConfig) -> Result<Vec<VariantResult>> {
    config.validate()?;

    config
        .selected_variants()
        .into_iter()
        .enumerate()
        .map(|(n, (i, j))| {
            // Distinct stream per variant so identical circuits don't share samples
            let simulator = match config.seed {
                Some(seed) => StatevectorSimulator::with_seed(seed.wrapping_add((n as u64) << 32)),
                None => StatevectorSimulator::new(),
            };
            run_variant(&simulator, i, j, config.shots)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_gate_indices() {
        for (k, gate) in ErrorGate::ALL.iter().enumerate() {
            assert_eq!(ErrorGate::from_index(k).unwrap(), *gate);
            assert_eq!(gate.index(), k);
        }
        assert_eq!(ErrorGate::from_index(3), Err(Error::InvalidErrorIndex(3)));
    }

    #[test]
    fn test_expected_syndrome_table() {
        use ErrorGate::*;
        assert_eq!(expected_syndrome(Identity, BitFlip), SyndromeOutcome::Corrected);
        assert_eq!(expected_syndrome(BitFlip, PhaseFlip), SyndromeOutcome::Corrected);
        assert_eq!(expected_syndrome(BitFlip, BitFlip), SyndromeOutcome::NoError);
        assert_eq!(expected_syndrome(PhaseFlip, Identity), SyndromeOutcome::NoError);
    }
}

// src/quantum/gate.rs
//! Quantum gates implementation
//!
//! Gates are unitary matrices acting on a fixed number of qubits. A gate is
//! applied to a larger register by embedding its matrix into the full system
//! operator for the chosen target qubits.

use std::fmt::Debug;

use ndarray::{array, Array1, Array2};
use num_complex::Complex64;

use super::state::StateVector;
use crate::error::{Error, Result};

/// Common complex numbers used in quantum gates
pub mod constants {
    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}

/// Trait for quantum gates
pub trait QuantumGate: Debug + Send + Sync {
    /// Returns the number of qubits this gate acts on
    fn qubit_count(&self) -> usize;

    /// Returns the matrix representation of this gate
    fn matrix(&self) -> Array2<Complex64>;

    /// Returns a display name for this gate
    fn name(&self) -> String;

    /// Create a clone of this gate
    fn clone_box(&self) -> Box<dyn QuantumGate>;

    /// The built-in gate this is, if any
    fn as_standard(&self) -> Option<StandardGate> {
        None
    }

    /// Apply this gate to specific qubits in a state
    ///
    /// The order of `qubits` matches the gate's own qubit order, so for a
    /// CNOT the control comes first.
    fn apply_to_qubits(&self, state: &StateVector, qubits: &[usize]) -> Result<StateVector> {
        if qubits.len() != self.qubit_count() {
            return Err(Error::ArityMismatch {
                gate: self.name(),
                expected: self.qubit_count(),
                actual: qubits.len(),
            });
        }

        for (k, &q) in qubits.iter().enumerate() {
            if q >= state.qubit_count() {
                return Err(Error::QubitOutOfRange {
                    index: q,
                    size: state.qubit_count(),
                });
            }
            if qubits[..k].contains(&q) {
                return Err(Error::DuplicateQubit(q));
            }
        }

        let full_matrix = self.tensor_to_full_system(state.qubit_count(), qubits);
        state.apply_matrix(&full_matrix)
    }

    /// Embed the gate matrix into the operator on `total_qubits` qubits
    fn tensor_to_full_system(&self, total_qubits: usize, target_qubits: &[usize]) -> Array2<Complex64> {
        let gate_matrix = self.matrix();
        let dim = 1 << total_qubits;
        let num_target = target_qubits.len();
        let mut result = Array2::zeros((dim, dim));

        let target_mask = target_qubits
            .iter()
            .fold(0usize, |mask, &q| mask | (1 << (total_qubits - 1 - q)));

        // Row/column pairs only couple when every non-target bit agrees
        for i in 0..dim {
            for j in 0..dim {
                if (i & !target_mask) != (j & !target_mask) {
                    continue;
                }

                let mut sub_i = 0;
                let mut sub_j = 0;
                for (k, &q) in target_qubits.iter().enumerate() {
                    let shift = total_qubits - 1 - q;
                    sub_i |= ((i >> shift) & 1) << (num_target - 1 - k);
                    sub_j |= ((j >> shift) & 1) << (num_target - 1 - k);
                }

                result[[i, j]] = gate_matrix[[sub_i, sub_j]];
            }
        }

        result
    }
}

/// Standard quantum gates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardGate {
    /// Single-qubit identity gate
    I,

    /// Pauli-X gate (bit flip)
    X,

    /// Pauli-Z gate (phase flip)
    Z,

    /// Hadamard gate
    H,

    /// CNOT gate, control first
    CNOT,
}

impl QuantumGate for StandardGate {
    fn qubit_count(&self) -> usize {
        match self {
            StandardGate::I | StandardGate::X | StandardGate::Z | StandardGate::H => 1,
            StandardGate::CNOT => 2,
        }
    }

    fn matrix(&self) -> Array2<Complex64> {
        use constants::*;
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        match self {
            StandardGate::I => Array2::from_diag(&Array1::from_elem(2, one)),
            StandardGate::X => array![[zero, one], [one, zero]],
            StandardGate::Z => array![[one, zero], [zero, -one]],
            StandardGate::H => {
                let factor = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![[factor, factor], [factor, -factor]]
            }
            StandardGate::CNOT => array![
                [one, zero, zero, zero],
                [zero, one, zero, zero],
                [zero, zero, zero, one],
                [zero, zero, one, zero]
            ],
        }
    }

    fn name(&self) -> String {
        match self {
            StandardGate::I => "I",
            StandardGate::X => "X",
            StandardGate::Z => "Z",
            StandardGate::H => "H",
            StandardGate::CNOT => "CNOT",
        }
        .to_string()
    }

    fn clone_box(&self) -> Box<dyn QuantumGate> {
        Box::new(*self)
    }

    fn as_standard(&self) -> Option<StandardGate> {
        Some(*self)
    }
}

impl Clone for Box<dyn QuantumGate> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

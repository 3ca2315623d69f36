// src/quantum/state.rs
//! Quantum state representations
//!
//! Pure states over `n` qubits stored as `2^n` complex amplitudes.
//! Qubit 0 is the most significant bit of a basis index.

use std::fmt::{self, Display};

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{Error, Result};

/// Tolerance used for normalisation and zero-probability checks
pub const EPSILON: f64 = 1e-10;

/// State vector representation of a quantum state
#[derive(Clone, Debug)]
pub struct StateVector {
    /// Number of qubits
    qubit_count: usize,

    /// The state vector as an array of complex amplitudes
    amplitudes: Array1<Complex64>,
}

impl StateVector {
    /// Create a new state vector with the given amplitudes
    pub fn new(qubit_count: usize, amplitudes: Array1<Complex64>) -> Result<Self> {
        let expected = 1 << qubit_count;

        if amplitudes.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: amplitudes.len(),
            });
        }

        let state = StateVector {
            qubit_count,
            amplitudes,
        };

        if !state.is_normalized() {
            return Err(Error::NotNormalized);
        }

        Ok(state)
    }

    /// Create a new state vector in the computational basis state |index⟩
    pub fn computational_basis(qubit_count: usize, index: usize) -> Result<Self> {
        let dim = 1 << qubit_count;

        if index >= dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                actual: index + 1,
            });
        }

        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = Complex64::new(1.0, 0.0);

        Ok(StateVector {
            qubit_count,
            amplitudes,
        })
    }

    /// Create the zero state |00...0⟩
    pub fn zero_state(qubit_count: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << qubit_count);
        amplitudes[0] = Complex64::new(1.0, 0.0);

        StateVector {
            qubit_count,
            amplitudes,
        }
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Dimension of the Hilbert space (2^n for n qubits)
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    pub fn is_normalized(&self) -> bool {
        let norm_sqr: f64 = self.amplitudes.iter().map(|amp| amp.norm_sqr()).sum();
        (norm_sqr - 1.0).abs() < EPSILON
    }

    /// Get a reference to the amplitudes
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Probability of observing the basis state `index`
    pub fn probability(&self, index: usize) -> f64 {
        if index >= self.dimension() {
            return 0.0;
        }
        self.amplitudes[index].norm_sqr()
    }

    /// Bit position of `qubit` inside a basis index
    pub fn shift_of(&self, qubit: usize) -> usize {
        self.qubit_count - 1 - qubit
    }

    /// Probability that measuring `qubit` yields 1
    pub fn probability_of_one(&self, qubit: usize) -> Result<f64> {
        if qubit >= self.qubit_count {
            return Err(Error::QubitOutOfRange {
                index: qubit,
                size: self.qubit_count,
            });
        }

        let shift = self.shift_of(qubit);
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| (i >> shift) & 1 == 1)
            .map(|(_, amp)| amp.norm_sqr())
            .sum())
    }

    /// Project `qubit` onto `bit` and renormalise
    pub fn collapse(&mut self, qubit: usize, bit: u8) -> Result<()> {
        if qubit >= self.qubit_count {
            return Err(Error::QubitOutOfRange {
                index: qubit,
                size: self.qubit_count,
            });
        }

        let shift = self.shift_of(qubit);
        let keep = |i: usize| ((i >> shift) & 1) as u8 == bit;
        let norm_sqr: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| keep(*i))
            .map(|(_, amp)| amp.norm_sqr())
            .sum();

        if norm_sqr < EPSILON {
            return Err(Error::ZeroProbability { qubit, outcome: bit });
        }

        let factor = 1.0 / norm_sqr.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if keep(i) { *amp * factor } else { Complex64::new(0.0, 0.0) };
        }
        Ok(())
    }

    /// Flip `qubit` by swapping paired amplitudes
    pub fn flip(&mut self, qubit: usize) -> Result<()> {
        if qubit >= self.qubit_count {
            return Err(Error::QubitOutOfRange {
                index: qubit,
                size: self.qubit_count,
            });
        }

        let mask = 1 << self.shift_of(qubit);
        for i in 0..self.dimension() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
        Ok(())
    }

    /// Inner product ⟨self|other⟩
    pub fn inner_product(&self, other: &Self) -> Result<Complex64> {
        if self.qubit_count != other.qubit_count {
            return Err(Error::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }

        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Apply a full-system matrix to this state vector
    pub fn apply_matrix(&self, matrix: &Array2<Complex64>) -> Result<Self> {
        let dim = self.dimension();

        if matrix.shape() != [dim, dim] {
            return Err(Error::DimensionMismatch {
                expected: dim,
                actual: matrix.shape()[0],
            });
        }

        Ok(StateVector {
            qubit_count: self.qubit_count,
            amplitudes: matrix.dot(&self.amplitudes),
        })
    }

    /// Tensor product `self ⊗ other`; `self` occupies the leading qubits
    pub fn tensor(&self, other: &Self) -> Self {
        let other_dim = other.dimension();
        let mut amplitudes = Array1::zeros(self.dimension() * other_dim);

        for (i, a) in self.amplitudes.iter().enumerate() {
            for (j, b) in other.amplitudes.iter().enumerate() {
                amplitudes[i * other_dim + j] = a * b;
            }
        }

        StateVector {
            qubit_count: self.qubit_count + other.qubit_count,
            amplitudes,
        }
    }
}

impl Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}-qubit state:", self.qubit_count)?;

        let mut has_entries = false;

        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob > EPSILON {
                has_entries = true;

                let bit_string = format!("{:0width$b}", i, width = self.qubit_count);
                writeln!(
                    f,
                    "  ({:.6}{:+.6}i) |{}⟩ [{:.1}%]",
                    amp.re,
                    amp.im,
                    bit_string,
                    prob * 100.0
                )?;
            }
        }

        if !has_entries {
            writeln!(f, "  (zero state)")?;
        }

        Ok(())
    }
}

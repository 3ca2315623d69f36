//! Error type shared by the circuit model and the simulator

use thiserror::Error;

/// Errors raised while building or simulating circuits
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("qubit index {index} out of range for {size}-qubit circuit")]
    QubitOutOfRange { index: usize, size: usize },

    #[error("classical bit index {index} out of range for {size}-bit circuit")]
    ClbitOutOfRange { index: usize, size: usize },

    #[error("unknown register '{0}'")]
    UnknownRegister(String),

    #[error("register '{name}' already declared")]
    DuplicateRegister { name: String },

    #[error("gate {gate} acts on {expected} qubits, but {actual} were specified")]
    ArityMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    #[error("qubit {0} listed more than once in a single operation")]
    DuplicateQubit(usize),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("state vector is not normalized")]
    NotNormalized,

    #[error("c_if called with no preceding gate to condition")]
    NoGateToCondition,

    #[error("condition value {value} does not fit in {size}-bit register '{register}'")]
    ConditionOutOfRange {
        register: String,
        value: u64,
        size: usize,
    },

    #[error("shot count must be positive")]
    ZeroShots,

    #[error("zero probability for outcome {outcome} on qubit {qubit}")]
    ZeroProbability { qubit: usize, outcome: u8 },

    #[error("error gate index {0} is not one of 0 (identity), 1 (bit flip), 2 (phase flip)")]
    InvalidErrorIndex(usize),

    #[error("exact probabilities require a circuit without measurement, reset or conditions")]
    MidCircuitMeasurement,
}

pub type Result<T> = std::result::Result<T, Error>;

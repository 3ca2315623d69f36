// src/quantum/mod.rs
//! Quantum states, gates and circuits
//!
//! The building blocks the simulator executes: a state vector, the gate
//! set used by the syndrome circuits, and a register-aware circuit model.

pub mod state;
pub mod gate;
pub mod circuit;

pub use state::StateVector;
pub use gate::{QuantumGate, StandardGate};
pub use circuit::{
    QuantumCircuit, CircuitBuilder, QuantumRegister, ClassicalRegister, Instruction, Condition,
};

/// Re-export commonly used types and traits
pub mod prelude {
    pub use super::{QuantumCircuit, CircuitBuilder, StateVector};
    pub use super::{QuantumGate, StandardGate};
}

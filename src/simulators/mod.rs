//! Quantum circuit simulators
//!
//! This module provides simulators for quantum circuits, offering
//! tools to simulate small circuits shot by shot on classical hardware.

pub mod statevector;

pub use statevector::{
    StatevectorSimulator,
    Outcome,
    MeasurementOutcome,
};

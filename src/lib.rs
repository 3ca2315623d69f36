//! Repetition-code syndrome measurement on a state-vector simulator
//!
//! This crate builds the two-code-qubit, one-link-qubit error detection
//! circuits, runs them shot by shot on a small state-vector simulator with
//! mid-circuit measurement and classically conditioned gates, and reports
//! the resulting count histograms.

pub mod error;
pub mod quantum;
pub mod simulators;
pub mod counts;
pub mod drawing;
pub mod config;
pub mod repetition;

pub use error::{Error, Result};

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::config::RunConfig;
    pub use crate::counts::Counts;
    pub use crate::drawing::draw;
    pub use crate::quantum::prelude::*;
    pub use crate::repetition::{build_syndrome_circuit, sweep, ErrorGate, VariantResult};
    pub use crate::simulators::StatevectorSimulator;
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

//! Reading syndrome and logical bits out of count keys
//!
//! Count keys look like `"r1r0 c1c0"`: the two round-link bits on the left,
//! the two code bits on the right.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::counts::Counts;

/// What the two syndrome rounds say about a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SyndromeOutcome {
    /// `00`: neither round saw a parity violation
    NoError,
    /// `01`: round one flagged an error and the correction cleared it
    Corrected,
    /// `10`: round one was clean, something broke parity before round two
    LateError,
    /// `11`: both rounds flagged, the correction did not help
    Uncorrected,
}

impl SyndromeOutcome {
    /// Parse the round-link half of a count key (round 2 bit first)
    pub fn from_bits(bits: &str) -> Option<Self> {
        match bits {
            "00" => Some(SyndromeOutcome::NoError),
            "01" => Some(SyndromeOutcome::Corrected),
            "10" => Some(SyndromeOutcome::LateError),
            "11" => Some(SyndromeOutcome::Uncorrected),
            _ => None,
        }
    }

    pub fn bits(self) -> &'static str {
        match self {
            SyndromeOutcome::NoError => "00",
            SyndromeOutcome::Corrected => "01",
            SyndromeOutcome::LateError => "10",
            SyndromeOutcome::Uncorrected => "11",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SyndromeOutcome::NoError => "no error detected in either round",
            SyndromeOutcome::Corrected => "error detected in round one and corrected",
            SyndromeOutcome::LateError => "error introduced between the two rounds",
            SyndromeOutcome::Uncorrected => "error detected but not corrected",
        }
    }
}

impl fmt::Display for SyndromeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.bits(), self.description())
    }
}

/// Logical value carried by the two code bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogicalReadout {
    Zero,
    One,
    /// Code qubits disagree
    Inconsistent,
}

impl LogicalReadout {
    pub fn from_bits(bits: &str) -> Self {
        match bits {
            "00" => LogicalReadout::Zero,
            "11" => LogicalReadout::One,
            _ => LogicalReadout::Inconsistent,
        }
    }
}

impl fmt::Display for LogicalReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalReadout::Zero => write!(f, "logical 0"),
            LogicalReadout::One => write!(f, "logical 1"),
            LogicalReadout::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// Split a count key into its syndrome and logical halves
pub fn split_key(key: &str) -> Option<(SyndromeOutcome, LogicalReadout)> {
    let (rounds, code) = key.split_once(' ')?;
    Some((SyndromeOutcome::from_bits(rounds)?, LogicalReadout::from_bits(code)))
}

/// Per-variant tallies of syndrome outcomes and logical readouts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantReport {
    pub syndromes: BTreeMap<SyndromeOutcome, usize>,
    pub readouts: BTreeMap<LogicalReadout, usize>,
    /// Shots whose key did not parse
    pub unparsed: usize,
}

impl VariantReport {
    pub fn from_counts(counts: &Counts) -> Self {
        let mut report = VariantReport::default();
        for (key, n) in counts.iter() {
            match split_key(key) {
                Some((syndrome, readout)) => {
                    *report.syndromes.entry(syndrome).or_insert(0) += n;
                    *report.readouts.entry(readout).or_insert(0) += n;
                }
                None => report.unparsed += n,
            }
        }
        report
    }

    /// The syndrome seen in every shot, if there was only one
    pub fn dominant_syndrome(&self) -> Option<SyndromeOutcome> {
        match self.syndromes.len() {
            1 => self.syndromes.keys().next().copied(),
            _ => None,
        }
    }
}

impl fmt::Display for VariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (syndrome, n) in &self.syndromes {
            writeln!(f, "  syndrome {}: {}", syndrome, n)?;
        }
        for (readout, n) in &self.readouts {
            writeln!(f, "  readout {}: {}", readout, n)?;
        }
        if self.unparsed > 0 {
            writeln!(f, "  unparsed: {}", self.unparsed)?;
        }
        Ok(())
    }
}

//! Measurement-count histograms

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Shot counts keyed by formatted classical bitstring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: BTreeMap<String, usize>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `n` more shots for `key`
    pub fn add(&mut self, key: impl Into<String>, n: usize) {
        *self.counts.entry(key.into()).or_insert(0) += n;
    }

    /// Count for `key`, zero if never observed
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Total number of shots recorded
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Fold another histogram into this one
    pub fn merge(mut self, other: Counts) -> Counts {
        for (key, n) in other.counts {
            self.add(key, n);
        }
        self
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, n)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", key, n)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(String, usize)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (key, n) in iter {
            counts.add(key, n);
        }
        counts
    }
}

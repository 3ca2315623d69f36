//! Run configuration for the syndrome sweep

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repetition::ERROR_CHOICES;

/// Shot count used when none is given
pub const DEFAULT_SHOTS: usize = 1024;

/// Parameters of one sweep over error-gate variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Executions per circuit
    pub shots: usize,
    /// Base seed for the simulator; `None` draws fresh entropy
    pub seed: Option<u64>,
    /// Restrict the sweep to these `(i, j)` variants; `None` runs all nine
    pub variants: Option<Vec<(usize, usize)>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            shots: DEFAULT_SHOTS,
            seed: None,
            variants: None,
        }
    }
}

impl RunConfig {
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_variant(mut self, i: usize, j: usize) -> Self {
        self.variants.get_or_insert_with(Vec::new).push((i, j));
        self
    }

    /// Reject zero shots and error indices outside 0..3
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(Error::ZeroShots);
        }
        for &(i, j) in self.variants.iter().flatten() {
            for index in [i, j] {
                if index >= ERROR_CHOICES {
                    return Err(Error::InvalidErrorIndex(index));
                }
            }
        }
        Ok(())
    }

    /// Variants to run, row-major `(0,0)..(2,2)` unless restricted
    pub fn selected_variants(&self) -> Vec<(usize, usize)> {
        match &self.variants {
            Some(variants) => variants.clone(),
            None => (0..ERROR_CHOICES)
                .flat_map(|i| (0..ERROR_CHOICES).map(move |j| (i, j)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_all_nine_in_order() {
        let config = RunConfig::default();
        assert_eq!(config.shots, DEFAULT_SHOTS);
        let variants = config.selected_variants();
        assert_eq!(variants.len(), 9);
        assert_eq!(variants[0], (0, 0));
        assert_eq!(variants[1], (0, 1));
        assert_eq!(variants[8], (2, 2));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert_eq!(RunConfig::default().with_shots(0).validate(), Err(Error::ZeroShots));
        assert_eq!(
            RunConfig::default().with_variant(1, 3).validate(),
            Err(Error::InvalidErrorIndex(3))
        );
        assert!(RunConfig::default().with_variant(2, 1).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.shots, DEFAULT_SHOTS);
        assert_eq!(config.seed, Some(7));
        assert!(config.variants.is_none());
    }
}

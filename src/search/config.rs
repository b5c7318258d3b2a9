//! Search configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wall-clock slice between cooperative yields, about one frame
pub const DEFAULT_YIELD_SLICE_MILLIS: u64 = 17;

/// Switches and pacing for one search.
///
/// # Examples
///
/// ```
/// use gridmark::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_alpha_beta_pruning(false)
///     .with_seed(42);
/// assert!(config.symmetry_pruning);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Cut nodes the parent would never choose
    pub alpha_beta_pruning: bool,
    /// Skip squares equivalent to a higher-priority square under a holding symmetry
    pub symmetry_pruning: bool,
    /// How long [`SearchTask::resume`](super::SearchTask::resume) runs before yielding
    pub yield_slice_millis: u64,
    /// Yield after each slice; when false one resume runs to completion
    pub non_blocking: bool,
    /// Seed for the final tie-break draw
    pub seed: Option<u64>,
}

impl SearchConfig {
    pub fn with_alpha_beta_pruning(mut self, enabled: bool) -> Self {
        self.alpha_beta_pruning = enabled;
        self
    }

    pub fn with_symmetry_pruning(mut self, enabled: bool) -> Self {
        self.symmetry_pruning = enabled;
        self
    }

    pub fn with_yield_slice_millis(mut self, millis: u64) -> Self {
        self.yield_slice_millis = millis;
        self
    }

    pub fn with_non_blocking(mut self, enabled: bool) -> Self {
        self.non_blocking = enabled;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn yield_slice(&self) -> Duration {
        Duration::from_millis(self.yield_slice_millis)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alpha_beta_pruning: true,
            symmetry_pruning: true,
            yield_slice_millis: DEFAULT_YIELD_SLICE_MILLIS,
            non_blocking: true,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert!(config.alpha_beta_pruning);
        assert!(config.symmetry_pruning);
        assert!(config.non_blocking);
        assert_eq!(config.yield_slice(), Duration::from_millis(17));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"symmetry_pruning": false, "seed": 3}"#).unwrap();
        assert!(!config.symmetry_pruning);
        assert!(config.alpha_beta_pruning);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.yield_slice_millis, DEFAULT_YIELD_SLICE_MILLIS);
    }
}

//! Search diagnostics

use std::{fmt, time::Duration};

use serde::Serialize;

/// Informational counters collected during one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes entered, root included
    pub states_sampled: u64,
    /// Candidates skipped because a symmetric twin is explored instead
    pub symmetry_culled: u64,
    /// Nodes abandoned by the alpha-beta test
    pub alpha_beta_cutoffs: u64,
    /// Deepest ply reached below the root
    pub max_depth: usize,
    /// Times the task handed control back before finishing
    pub yields: u64,
    /// Wall-clock time from start to completion
    pub elapsed: Duration,
}

impl SearchStats {
    /// Everything the search declined to evaluate
    pub fn skipped(&self) -> u64 {
        self.symmetry_culled + self.alpha_beta_cutoffs
    }

    pub fn states_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.states_sampled as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "states={} culled={} cutoffs={} depth={} yields={} time={:.2?}",
            self.states_sampled,
            self.symmetry_culled,
            self.alpha_beta_cutoffs,
            self.max_depth,
            self.yields,
            self.elapsed,
        )
    }
}

//! Run configuration for the PageRank computation.

use serde::{Deserialize, Serialize};

/// Iteration parameters for [`Pagerank::run`](crate::pagerank::Pagerank::run).
///
/// There is no convergence threshold: the caller picks a fixed iteration
/// count and the engine runs exactly that many full-graph updates. The
/// per-iteration change-ratio range reported to the observer is the tool for
/// judging how settled the vector is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Probability of following a link instead of teleporting uniformly.
    /// Must lie in `[0, 1]`; the standard value is 0.85.
    pub damping: f64,
    /// Number of full-graph iterations to run.
    pub iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            iterations: 30,
        }
    }
}

impl RankConfig {
    /// Create a config with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
}

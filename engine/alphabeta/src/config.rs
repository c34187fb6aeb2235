//! Alpha-beta configuration parameters.

/// Configuration for the alpha-beta search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaBetaConfig {
    /// Search depth in plies. Depth 0 returns the static evaluation.
    pub depth: u32,

    /// Search root children on the rayon pool instead of sequentially.
    pub parallel: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            parallel: false,
        }
    }
}

impl AlphaBetaConfig {
    /// Create a shallow config for testing.
    pub fn for_testing() -> Self {
        Self {
            depth: 3,
            parallel: false,
        }
    }

    /// Builder pattern: set search depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: toggle root parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

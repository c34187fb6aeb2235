//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for the rollout (UCT) search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    pub num_simulations: u32,

    /// Exploration constant in the UCT formula.
    /// `√2` is the textbook value for rewards in [-1, 1].
    pub c_uct: f32,

    /// Optional wall-clock budget, checked between simulations.
    /// The search stops at whichever of the two limits comes first.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            c_uct: std::f32::consts::SQRT_2,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 200,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set UCT exploration constant.
    pub fn with_c_uct(mut self, c: f32) -> Self {
        self.c_uct = c;
        self
    }

    /// Builder pattern: set a wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Configuration for the oracle-guided search.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidedConfig {
    /// Number of simulations to run per search.
    pub num_simulations: u32,

    /// Weight of the prior term in `W/N + c_puct * P / (1 + N)`.
    pub c_puct: f32,

    /// Dirichlet noise alpha for the root priors.
    /// Set to 0.0 to disable noise.
    pub dirichlet_alpha: f32,

    /// Fraction of each root prior replaced by noise.
    pub dirichlet_weight: f32,

    /// Temperature for the final move choice.
    /// 0.0 = most visited column, > 0.0 = sample from `visits^(1/T)`.
    pub temperature: f32,
}

impl Default for GuidedConfig {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            c_puct: 1.0,
            dirichlet_alpha: 0.0,
            dirichlet_weight: 0.25,
            temperature: 0.0,
        }
    }
}

impl GuidedConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set c_puct exploration constant.
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    /// Builder pattern: set root noise.
    pub fn with_dirichlet(mut self, alpha: f32, weight: f32) -> Self {
        self.dirichlet_alpha = alpha;
        self.dirichlet_weight = weight;
        self
    }

    /// Builder pattern: set temperature.
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 1000);
        assert!((config.c_uct - 1.414).abs() < 1e-3);
        assert!(config.time_limit.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::for_testing()
            .with_simulations(100)
            .with_time_limit(Duration::from_millis(50));

        assert_eq!(config.num_simulations, 100);
        assert_eq!(config.time_limit, Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_guided_defaults_are_greedy() {
        let config = GuidedConfig::default();
        assert_eq!(config.num_simulations, 100);
        assert!((config.dirichlet_alpha).abs() < 1e-6);
        assert!((config.temperature).abs() < 1e-6);

        let config = GuidedConfig::default()
            .with_dirichlet(0.3, 0.25)
            .with_temperature(0.5);
        assert!((config.dirichlet_alpha - 0.3).abs() < 1e-6);
        assert!((config.temperature - 0.5).abs() < 1e-6);
    }
}

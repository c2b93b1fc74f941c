//! 2-opt configuration.

/// How improving moves are applied within one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwoOptStrategy {
    /// Apply each improving reversal as soon as it is found and keep
    /// scanning the remaining pairs of the same pass on the updated tour.
    #[default]
    FirstImprovement,

    /// Evaluate every reversal of the pass-start tour and apply only the
    /// best one at the end of the pass.
    BestImprovement,
}

/// Configuration for 2-opt descent.
///
/// # Examples
///
/// ```
/// use u_tsp::two_opt::{TwoOptConfig, TwoOptStrategy};
///
/// let config = TwoOptConfig::default()
///     .with_strategy(TwoOptStrategy::BestImprovement)
///     .with_max_passes(50);
/// assert_eq!(config.max_passes, 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Move application strategy.
    pub strategy: TwoOptStrategy,

    /// Maximum number of full passes. 0 = run until a local optimum.
    pub max_passes: usize,
}

impl TwoOptConfig {
    pub fn with_strategy(mut self, strategy: TwoOptStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TwoOptConfig::default();
        assert_eq!(config.strategy, TwoOptStrategy::FirstImprovement);
        assert_eq!(config.max_passes, 0);
    }
}

//! Engine configuration.

use gridpath_algorithms::{DEFAULT_BRANCHING_THRESHOLD, DEFAULT_MAX_ENUMERATION_DIM};
use gridpath_core::execution::ExecutorConfig;
use thiserror::Error;

/// Errors from [`Config::validate()`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An explicit recursive pool size must be greater than zero.
    #[error("recursive_threads must be greater than zero")]
    ZeroThreads,
    /// The general pool multiplier must be greater than zero.
    #[error("general_multiplier must be greater than zero")]
    ZeroMultiplier,
    /// The path enumeration bound must be greater than zero.
    #[error("max_enumeration_dim must be greater than zero")]
    ZeroEnumerationBound,
    /// The parallel traversal branching threshold must be greater than zero.
    #[error("branching_threshold must be greater than zero")]
    ZeroBranchingThreshold,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pool sizes and stack size for the engine's executor.
    pub executor: ExecutorConfig,

    /// Largest grid side accepted by all-paths enumeration.
    pub max_enumeration_dim: usize,

    /// Improved neighbors a parallel traversal task handles in place before
    /// forking children.
    pub branching_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executor: ExecutorConfig::default(),
            max_enumeration_dim: DEFAULT_MAX_ENUMERATION_DIM,
            branching_threshold: DEFAULT_BRANCHING_THRESHOLD,
        }
    }
}

impl Config {
    /// Sets the executor configuration.
    #[must_use]
    pub fn with_executor(mut self, executor: ExecutorConfig) -> Self {
        self.executor = executor;
        self
    }

    /// Sets the enumeration bound.
    #[must_use]
    pub fn with_max_enumeration_dim(mut self, max: usize) -> Self {
        self.max_enumeration_dim = max;
        self
    }

    /// Sets the branching threshold.
    #[must_use]
    pub fn with_branching_threshold(mut self, threshold: usize) -> Self {
        self.branching_threshold = threshold;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.executor.recursive_threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }

        if self.executor.general_multiplier == 0 {
            return Err(ConfigError::ZeroMultiplier);
        }

        if self.max_enumeration_dim == 0 {
            return Err(ConfigError::ZeroEnumerationBound);
        }

        if self.branching_threshold == 0 {
            return Err(ConfigError::ZeroBranchingThreshold);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_enumeration_dim, 50);
        assert_eq!(config.branching_threshold, 1);
        assert_eq!(config.executor, ExecutorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builders() {
        let config = Config::default()
            .with_executor(ExecutorConfig::default().with_recursive_threads(2))
            .with_max_enumeration_dim(10)
            .with_branching_threshold(4);
        assert_eq!(config.executor.recursive_threads, Some(2));
        assert_eq!(config.max_enumeration_dim, 10);
        assert_eq!(config.branching_threshold, 4);
    }

    // --- validate() tests ---

    #[test]
    fn test_validate_zero_threads() {
        let config =
            Config::default().with_executor(ExecutorConfig::default().with_recursive_threads(0));
        assert_eq!(config.validate(), Err(ConfigError::ZeroThreads));
    }

    #[test]
    fn test_validate_zero_multiplier() {
        let config =
            Config::default().with_executor(ExecutorConfig::default().with_general_multiplier(0));
        assert_eq!(config.validate(), Err(ConfigError::ZeroMultiplier));
    }

    #[test]
    fn test_validate_zero_bound() {
        let config = Config::default().with_max_enumeration_dim(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroEnumerationBound));
    }

    #[test]
    fn test_validate_zero_branching_threshold() {
        let config = Config::default().with_branching_threshold(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBranchingThreshold));
        assert_eq!(
            ConfigError::ZeroBranchingThreshold.to_string(),
            "branching_threshold must be greater than zero"
        );
    }
}

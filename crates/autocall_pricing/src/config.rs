//! Engine configuration for Monte Carlo pricing runs.

use autocall_core::ConfigError;

/// Configuration of one Monte Carlo pricing run.
///
/// Immutable once built; use [`EngineConfig::builder`]. The worker count is
/// an explicit input so a run's partitioning never depends on the executing
/// machine; callers wanting the machine's core count pass it in themselves.
///
/// # Examples
///
/// ```rust
/// use autocall_pricing::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .n_paths(300_000)
///     .workers(8)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_pairs(), 150_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineConfig {
    /// Total path count; must be even (antithetic pairs) and non-zero.
    n_paths: usize,
    /// Number of parallel workers to partition the pairs across.
    workers: usize,
    /// Base seed; chunk `i` derives its stream from `seed + i`.
    seed: u64,
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Returns the total path count.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the antithetic pair count (`n_paths / 2`).
    #[inline]
    pub fn n_pairs(&self) -> usize {
        self.n_paths / 2
    }

    /// Returns the worker count.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the base seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    n_paths: Option<usize>,
    workers: Option<usize>,
    seed: u64,
}

impl EngineConfigBuilder {
    /// Sets the total path count (must be even and non-zero).
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the worker count (must be at least 1).
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the base seed. Defaults to 0.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path count is missing, zero, or odd, or
    /// if the worker count is missing or zero.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;
        let workers = self.workers.ok_or(ConfigError::InvalidParameter {
            name: "workers",
            value: "must be specified".to_string(),
        })?;

        if n_paths == 0 || n_paths % 2 != 0 {
            return Err(ConfigError::InvalidPathCount(n_paths));
        }
        if workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(workers));
        }

        Ok(EngineConfig {
            n_paths,
            workers,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_valid() {
        let config = EngineConfig::builder()
            .n_paths(10_000)
            .workers(4)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.n_paths(), 10_000);
        assert_eq!(config.n_pairs(), 5_000);
        assert_eq!(config.workers(), 4);
        assert_eq!(config.seed(), 7);
    }

    #[test]
    fn test_seed_defaults_to_zero() {
        let config = EngineConfig::builder()
            .n_paths(100)
            .workers(1)
            .build()
            .unwrap();
        assert_eq!(config.seed(), 0);
    }

    #[test]
    fn test_zero_paths_rejected() {
        let result = EngineConfig::builder().n_paths(0).workers(1).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(0))));
    }

    #[test]
    fn test_odd_paths_rejected() {
        let result = EngineConfig::builder().n_paths(30_001).workers(1).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(30_001))));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = EngineConfig::builder().n_paths(100).workers(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_missing_paths_rejected() {
        let result = EngineConfig::builder().workers(2).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "n_paths", .. })
        ));
    }

    #[test]
    fn test_missing_workers_rejected() {
        let result = EngineConfig::builder().n_paths(100).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "workers", .. })
        ));
    }
}

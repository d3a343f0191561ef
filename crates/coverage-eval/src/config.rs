//! Run configuration

use coverage_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default sample sizes
pub const DEFAULT_SAMPLE_SIZES: [usize; 4] = [10, 100, 1000, 10000];

/// Default nominal miss levels (α)
pub const DEFAULT_ALPHAS: [f64; 3] = [0.25, 0.1, 0.05];

/// Default number of trials per (scenario, sample size)
pub const DEFAULT_REPEATS: usize = 10000;

/// How to treat an estimator that returns `lower > upper`
///
/// NaN bounds are always rejected; this only governs inverted intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalPolicy {
    /// Count the trial as a miss and keep going
    #[default]
    CountAsMiss,
    /// Abort the run with [`Error::MalformedInterval`]
    Strict,
}

/// Parameters of a coverage run
///
/// Deserializing fills unspecified fields with their defaults, so a caller
/// can override any subset:
///
/// ```rust
/// use coverage_eval::CoverageConfig;
///
/// let config = CoverageConfig::from_json(r#"{ "repeats": 500, "seed": 7 }"#).unwrap();
/// assert_eq!(config.repeats(), 500);
/// assert_eq!(config.sample_sizes(), &[10, 100, 1000, 10000]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverageConfig {
    sample_sizes: Vec<usize>,
    alphas: Vec<f64>,
    repeats: usize,
    seed: Option<u64>,
    chunk_size: Option<usize>,
    interval_policy: IntervalPolicy,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            sample_sizes: DEFAULT_SAMPLE_SIZES.to_vec(),
            alphas: DEFAULT_ALPHAS.to_vec(),
            repeats: DEFAULT_REPEATS,
            seed: None,
            chunk_size: None,
            interval_policy: IntervalPolicy::default(),
        }
    }
}

impl CoverageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the sample sizes, in report order
    pub fn with_sample_sizes(mut self, sample_sizes: impl Into<Vec<usize>>) -> Self {
        self.sample_sizes = sample_sizes.into();
        self
    }

    /// Set the nominal miss levels, in report order
    pub fn with_alphas(mut self, alphas: impl Into<Vec<f64>>) -> Self {
        self.alphas = alphas.into();
        self
    }

    /// Set the number of trials per bucket
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the engine's choice of trials per work unit
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_interval_policy(mut self, policy: IntervalPolicy) -> Self {
        self.interval_policy = policy;
        self
    }

    pub fn sample_sizes(&self) -> &[usize] {
        &self.sample_sizes
    }

    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    pub fn repeats(&self) -> usize {
        self.repeats
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn chunk_size(&self) -> Option<usize> {
        self.chunk_size
    }

    pub fn interval_policy(&self) -> IntervalPolicy {
        self.interval_policy
    }

    /// Reject malformed values before any trial runs
    pub fn validate(&self) -> Result<()> {
        if self.sample_sizes.is_empty() {
            return Err(Error::empty_list("sample_sizes"));
        }
        if let Some(&n) = self.sample_sizes.iter().find(|&&n| n == 0) {
            return Err(Error::InvalidConfig(format!("sample size {n} must be positive")));
        }

        if self.alphas.is_empty() {
            return Err(Error::empty_list("alphas"));
        }
        if let Some(&a) = self.alphas.iter().find(|&&a| !(a > 0.0 && a < 1.0)) {
            return Err(Error::InvalidConfig(format!("alpha {a} must be in (0, 1)")));
        }

        if self.repeats == 0 {
            return Err(Error::InvalidConfig("repeats must be positive".to_string()));
        }
        if self.chunk_size == Some(0) {
            return Err(Error::InvalidConfig("chunk_size must be positive".to_string()));
        }

        Ok(())
    }
}

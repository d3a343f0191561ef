//! High-level API for coverage runs
//!
//! These functions pick the execution engine from the enabled features and
//! use the standard scenario catalog. Use [`ScenarioDriver`] directly for a
//! custom engine or catalog.

use crate::catalog::Scenario;
use crate::config::CoverageConfig;
use crate::driver::ScenarioDriver;
use crate::evaluator::CoverageEvaluator;
use crate::registry::EstimatorRegistry;
use crate::results::CoverageReport;
use crate::traits::IntervalEstimator;
use coverage_core::{auto_engine, Result, StreamSeed};

/// Number of trials for quick smoke runs
pub const FAST_REPEATS: usize = 1000;

/// Number of trials for tighter miss fraction estimates
pub const HIGH_PRECISION_REPEATS: usize = 100_000;

/// Run the standard battery for every registered estimator
///
/// # Example
/// ```rust
/// use coverage_eval::{infallible_fn, run_coverage, CoverageConfig, EstimatorRegistry};
///
/// let registry = EstimatorRegistry::new()
///     .with("unit interval", infallible_fn(|_s: &[f64]| (0.0, 1.0)))
///     .unwrap();
/// let config = CoverageConfig::new()
///     .with_sample_sizes(vec![10])
///     .with_repeats(100)
///     .with_seed(1);
///
/// let report = run_coverage(config, &registry).unwrap();
/// let unit = report.estimator("unit interval").unwrap();
/// assert_eq!(unit.scenarios.len(), 9);
/// ```
pub fn run_coverage(config: CoverageConfig, registry: &EstimatorRegistry) -> Result<CoverageReport> {
    ScenarioDriver::new(auto_engine(), config)?.run(registry)
}

/// Miss fraction of one estimator on one scenario
///
/// `seed` fixes the random stream; `None` draws a fresh one.
pub fn evaluate_scenario<Est>(
    scenario: &Scenario,
    sample_size: usize,
    repeats: usize,
    estimator: Est,
    seed: Option<u64>,
) -> Result<f64>
where
    Est: IntervalEstimator + 'static,
{
    let stream = seed.map_or_else(StreamSeed::from_entropy, StreamSeed::new);
    CoverageEvaluator::new(auto_engine())
        .with_repeats(repeats)
        .miss_fraction(scenario, sample_size, estimator, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::infallible_fn;
    use coverage_sampling::Distribution;

    #[test]
    fn test_evaluate_scenario() {
        let scenario = Scenario::new("balanced", Distribution::bernoulli(0.5).unwrap()).unwrap();
        let miss = evaluate_scenario(&scenario, 10, FAST_REPEATS, infallible_fn(|_s: &[f64]| (0.0, 1.0)), None).unwrap();
        assert_eq!(miss, 0.0);
    }

    #[test]
    fn test_evaluate_scenario_rejects_zero_repeats() {
        let scenario = Scenario::new("balanced", Distribution::bernoulli(0.5).unwrap()).unwrap();
        assert!(evaluate_scenario(&scenario, 10, 0, infallible_fn(|_s: &[f64]| (0.0, 1.0)), Some(1)).is_err());
    }
}
